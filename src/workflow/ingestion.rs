//! 文档接入控制器
//!
//! 负责"一个文档"的生命周期：选择 → 上传 → 提取结果 / 失败恢复
//!
//! ```text
//! NoDocument → DocumentSelected → Uploading → Extracted
//!                    ↑                 ↘
//!                    └── 重新选择 ──    UploadFailed ── 手动重试 → Uploading
//! ```

use std::fmt;

use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{Document, FileCandidate};
use crate::services::ExtractionService;
use crate::workflow::Completion;

/// 接入控制器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionState {
    NoDocument,
    DocumentSelected,
    Uploading,
    Extracted,
    UploadFailed,
}

impl fmt::Display for IngestionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// 在途上传请求的凭证
///
/// 记录发起时的代数，完成时代数不一致说明文档已被替换或移除
#[derive(Debug, Clone)]
pub struct UploadTicket {
    generation: u64,
    document: Document,
}

impl UploadTicket {
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// 文档接入控制器
#[derive(Debug)]
pub struct IngestionController {
    state: IngestionState,
    document: Option<Document>,
    extracted_text: String,
    /// 每次选择或移除文档都会递增
    generation: u64,
    last_error: Option<String>,
}

impl Default for IngestionController {
    fn default() -> Self {
        Self::new()
    }
}

impl IngestionController {
    pub fn new() -> Self {
        Self {
            state: IngestionState::NoDocument,
            document: None,
            extracted_text: String::new(),
            generation: 0,
            last_error: None,
        }
    }

    pub fn state(&self) -> IngestionState {
        self.state
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// 提取出的文本，未成功提取时为空
    pub fn extracted_text(&self) -> &str {
        &self.extracted_text
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 选择文件
    ///
    /// 非 PDF 直接拒绝，状态和当前文档保持不变。
    /// 接受后丢弃之前的提取文本，进入 `DocumentSelected`。
    pub fn select_file(&mut self, candidate: FileCandidate) -> AppResult<()> {
        let document = Document::try_from(candidate).map_err(|e| {
            warn!("⚠️ 拒绝文件: {}", e);
            e
        })?;

        if self.state == IngestionState::Uploading {
            return Err(AppError::invalid_state("select_file", self.state));
        }

        info!(
            "📎 已选择文件: {} ({} 字节)",
            document.name(),
            document.size()
        );

        self.generation += 1;
        self.document = Some(document);
        self.extracted_text.clear();
        self.last_error = None;
        self.state = IngestionState::DocumentSelected;
        Ok(())
    }

    /// 移除文件，任何状态下都回到 `NoDocument`
    pub fn remove_file(&mut self) {
        if self.document.is_some() {
            debug!("移除文件，丢弃提取文本");
        }
        self.generation += 1;
        self.document = None;
        self.extracted_text.clear();
        self.last_error = None;
        self.state = IngestionState::NoDocument;
    }

    /// 开始上传
    ///
    /// # 返回
    /// - `Ok(Some(ticket))`: 已进入 `Uploading`，调用方需发出上传请求
    /// - `Ok(None)`: 已有上传在途，本次调用不做任何事
    /// - `Err`: 当前状态不允许上传
    pub fn begin_scan(&mut self) -> AppResult<Option<UploadTicket>> {
        match self.state {
            IngestionState::DocumentSelected | IngestionState::UploadFailed => {}
            IngestionState::Uploading => {
                debug!("已有上传在途，忽略本次请求");
                return Ok(None);
            }
            state => return Err(AppError::invalid_state("start_scan", state)),
        }

        let document = match &self.document {
            Some(doc) => doc.clone(),
            None => return Err(AppError::invalid_state("start_scan", self.state)),
        };

        info!("⏫ 开始上传: {}", document.name());
        self.generation += 1;
        self.state = IngestionState::Uploading;
        self.last_error = None;

        Ok(Some(UploadTicket {
            generation: self.generation,
            document,
        }))
    }

    /// 上传结束，应用结果
    ///
    /// 凭证过期（期间文档被移除或替换）时结果被丢弃，返回 `Completion::Ignored`。
    /// 失败时进入 `UploadFailed` 并把错误原样返回。
    pub fn complete_scan(
        &mut self,
        ticket: UploadTicket,
        result: AppResult<String>,
    ) -> AppResult<Completion> {
        if ticket.generation != self.generation || self.state != IngestionState::Uploading {
            debug!(
                "丢弃过期的上传结果 (凭证代数 {}, 当前代数 {})",
                ticket.generation, self.generation
            );
            return Ok(Completion::Ignored);
        }

        match result {
            Ok(content) => {
                info!("✓ 文本提取成功，共 {} 字符", content.chars().count());
                self.extracted_text = content;
                self.state = IngestionState::Extracted;
                Ok(Completion::Applied)
            }
            Err(e) => {
                warn!("❌ 上传失败: {}", e);
                self.extracted_text.clear();
                self.last_error = Some(e.to_string());
                self.state = IngestionState::UploadFailed;
                Err(e)
            }
        }
    }

    /// 上传并等待结果
    pub async fn scan(&mut self, service: &dyn ExtractionService) -> AppResult<Completion> {
        let Some(ticket) = self.begin_scan()? else {
            return Ok(Completion::Ignored);
        };
        let result = service.extract(ticket.document()).await;
        self.complete_scan(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::{media_type_for, PDF_MEDIA_TYPE};

    fn pdf(name: &str) -> FileCandidate {
        FileCandidate::new(name, PDF_MEDIA_TYPE, b"%PDF-1.4 fake".to_vec())
    }

    fn extracted(controller: &mut IngestionController, text: &str) {
        controller.select_file(pdf("doc.pdf")).unwrap();
        let ticket = controller.begin_scan().unwrap().unwrap();
        controller
            .complete_scan(ticket, Ok(text.to_string()))
            .unwrap();
    }

    #[test]
    fn test_non_pdf_leaves_state_unchanged() {
        let mut controller = IngestionController::new();
        controller.select_file(pdf("first.pdf")).unwrap();

        let err = controller
            .select_file(FileCandidate::new(
                "notes.docx",
                media_type_for("notes.docx"),
                Vec::new(),
            ))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(controller.state(), IngestionState::DocumentSelected);
        assert_eq!(controller.document().unwrap().name(), "first.pdf");
    }

    #[test]
    fn test_reselect_replaces_document_and_drops_text() {
        let mut controller = IngestionController::new();
        extracted(&mut controller, "old text");
        assert_eq!(controller.state(), IngestionState::Extracted);

        controller.select_file(pdf("second.pdf")).unwrap();
        assert_eq!(controller.state(), IngestionState::DocumentSelected);
        assert_eq!(controller.document().unwrap().name(), "second.pdf");
        assert!(controller.extracted_text().is_empty());
    }

    #[test]
    fn test_remove_is_total_and_idempotent() {
        let mut controller = IngestionController::new();
        controller.remove_file();
        assert_eq!(controller.state(), IngestionState::NoDocument);

        extracted(&mut controller, "text");
        controller.remove_file();
        controller.remove_file();
        assert_eq!(controller.state(), IngestionState::NoDocument);
        assert!(controller.document().is_none());
        assert!(controller.extracted_text().is_empty());
    }

    #[test]
    fn test_scan_requires_document() {
        let mut controller = IngestionController::new();
        let err = controller.begin_scan().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Precondition);
    }

    #[test]
    fn test_second_scan_while_uploading_is_noop() {
        let mut controller = IngestionController::new();
        controller.select_file(pdf("doc.pdf")).unwrap();
        let ticket = controller.begin_scan().unwrap();
        assert!(ticket.is_some());
        assert!(controller.begin_scan().unwrap().is_none());
        assert_eq!(controller.state(), IngestionState::Uploading);
    }

    #[test]
    fn test_failure_then_manual_retry() {
        let mut controller = IngestionController::new();
        controller.select_file(pdf("doc.pdf")).unwrap();

        let ticket = controller.begin_scan().unwrap().unwrap();
        let err = controller
            .complete_scan(ticket, Err(AppError::bad_status("/api/upload", 500, "")))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(controller.state(), IngestionState::UploadFailed);
        assert!(controller.extracted_text().is_empty());
        assert!(controller.last_error().is_some());

        let ticket = controller.begin_scan().unwrap().unwrap();
        controller
            .complete_scan(ticket, Ok("retry ok".to_string()))
            .unwrap();
        assert_eq!(controller.state(), IngestionState::Extracted);
        assert_eq!(controller.extracted_text(), "retry ok");
        assert!(controller.last_error().is_none());
    }

    #[test]
    fn test_late_result_after_remove_is_ignored() {
        let mut controller = IngestionController::new();
        controller.select_file(pdf("doc.pdf")).unwrap();
        let ticket = controller.begin_scan().unwrap().unwrap();

        controller.remove_file();
        let outcome = controller
            .complete_scan(ticket, Ok("late".to_string()))
            .unwrap();

        assert_eq!(outcome, Completion::Ignored);
        assert_eq!(controller.state(), IngestionState::NoDocument);
        assert!(controller.extracted_text().is_empty());
    }

    #[test]
    fn test_select_while_uploading_is_rejected() {
        let mut controller = IngestionController::new();
        controller.select_file(pdf("doc.pdf")).unwrap();
        controller.begin_scan().unwrap();

        let err = controller.select_file(pdf("other.pdf")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert_eq!(controller.document().unwrap().name(), "doc.pdf");
    }

    #[test]
    fn test_duplicate_reply_from_failed_attempt_ignored_on_retry() {
        let mut controller = IngestionController::new();
        controller.select_file(pdf("doc.pdf")).unwrap();

        let first = controller.begin_scan().unwrap().unwrap();
        let duplicate = first.clone();
        controller
            .complete_scan(first, Err(AppError::bad_status("/api/upload", 500, "")))
            .unwrap_err();

        let retry = controller.begin_scan().unwrap().unwrap();
        let outcome = controller
            .complete_scan(duplicate, Ok("stale".to_string()))
            .unwrap();
        assert_eq!(outcome, Completion::Ignored);
        assert_eq!(controller.state(), IngestionState::Uploading);

        controller
            .complete_scan(retry, Ok("fresh".to_string()))
            .unwrap();
        assert_eq!(controller.extracted_text(), "fresh");
    }
}
