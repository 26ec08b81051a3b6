//! 会话 - 流程层
//!
//! 每个用户会话构造一个 `Session`，由它独占三个控制器并负责它们之间的按值移交：
//!
//! ```text
//! IngestionController ──文本──▶ QuizRequestController ──题目集合──▶ QuizSessionController
//! ```
//!
//! 界面层只通过 `&mut Session` 驱动流程，不存在全局状态。

use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{FileCandidate, Question, QuestionId, SessionState};
use crate::services::{ExtractionService, QuizService};
use crate::workflow::ingestion::{IngestionController, IngestionState, UploadTicket};
use crate::workflow::quiz_request::{QuizRequestController, QuizRequestState, QuizTicket};
use crate::workflow::quiz_session::QuizSessionController;
use crate::workflow::scoring::Score;
use crate::workflow::Completion;

/// 答题视图入口
///
/// 没有有效移交时必须显示"没有题目"的兜底页
#[derive(Debug)]
pub enum QuizView<'a> {
    Active(&'a mut QuizSessionController),
    NoQuestions,
}

/// 单个用户会话
#[derive(Debug, Default)]
pub struct Session {
    ingestion: IngestionController,
    request: QuizRequestController,
    quiz: Option<QuizSessionController>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前会话状态，由各控制器状态合成
    pub fn state(&self) -> SessionState {
        if let Some(quiz) = &self.quiz {
            return if quiz.is_submitted() {
                SessionState::QuizSubmitted
            } else {
                SessionState::QuizReady
            };
        }

        if self.request.state() == QuizRequestState::Requesting {
            return SessionState::GeneratingQuiz;
        }

        match self.ingestion.state() {
            IngestionState::NoDocument => SessionState::NoDocument,
            IngestionState::DocumentSelected => SessionState::DocumentSelected,
            IngestionState::Uploading => SessionState::Uploading,
            IngestionState::Extracted => SessionState::Extracted,
            IngestionState::UploadFailed => SessionState::UploadFailed,
        }
    }

    pub fn ingestion(&self) -> &IngestionController {
        &self.ingestion
    }

    pub fn quiz_request(&self) -> &QuizRequestController {
        &self.request
    }

    pub fn quiz(&self) -> Option<&QuizSessionController> {
        self.quiz.as_ref()
    }

    /// 进入答题视图
    pub fn quiz_view(&mut self) -> QuizView<'_> {
        match self.quiz.as_mut() {
            Some(quiz) => QuizView::Active(quiz),
            None => QuizView::NoQuestions,
        }
    }

    pub fn extracted_text(&self) -> &str {
        self.ingestion.extracted_text()
    }

    /// 给用户看的状态提示
    pub fn status_message(&self) -> Option<String> {
        match self.state() {
            SessionState::Uploading => Some("正在上传并提取文本...".to_string()),
            SessionState::Extracted => match self.request.last_error() {
                Some(e) => Some(format!("测验生成失败: {}", e)),
                None => Some("文本提取成功".to_string()),
            },
            SessionState::UploadFailed => Some(format!(
                "上传失败: {}",
                self.ingestion.last_error().unwrap_or("未知错误")
            )),
            SessionState::GeneratingQuiz => Some("正在生成测验...".to_string()),
            SessionState::QuizSubmitted => self
                .quiz
                .as_ref()
                .and_then(|q| q.score())
                .map(|s| format!("得分 {}", s)),
            SessionState::NoDocument
            | SessionState::DocumentSelected
            | SessionState::QuizReady => None,
        }
    }

    // ========== 文档接入 ==========

    /// 选择文件，接受后之前的提取文本和测验全部作废
    pub fn select_file(&mut self, candidate: FileCandidate) -> AppResult<()> {
        if self.quiz.is_some() {
            return Err(AppError::invalid_state("select_file", self.state()));
        }
        self.ingestion.select_file(candidate)?;
        self.request.reset();
        Ok(())
    }

    /// 移除文件，任何状态下都可以调用
    pub fn remove_file(&mut self) {
        self.ingestion.remove_file();
        self.request.reset();
        self.quiz = None;
    }

    pub fn begin_scan(&mut self) -> AppResult<Option<UploadTicket>> {
        if self.quiz.is_some() {
            return Err(AppError::invalid_state("start_scan", self.state()));
        }
        self.ingestion.begin_scan()
    }

    pub fn complete_scan(
        &mut self,
        ticket: UploadTicket,
        result: AppResult<String>,
    ) -> AppResult<Completion> {
        self.ingestion.complete_scan(ticket, result)
    }

    /// 上传当前文档并等待提取结果
    pub async fn scan(&mut self, service: &dyn ExtractionService) -> AppResult<Completion> {
        let Some(ticket) = self.begin_scan()? else {
            return Ok(Completion::Ignored);
        };
        let result = service.extract(ticket.document()).await;
        self.complete_scan(ticket, result)
    }

    // ========== 出题 ==========

    /// 把提取文本按值交给出题控制器
    ///
    /// 接入控制器仍保留文本，失败后可直接重试
    pub fn begin_quiz_request(&mut self) -> AppResult<Option<QuizTicket>> {
        if self.quiz.is_some() {
            return Err(AppError::invalid_state("request_quiz", self.state()));
        }
        if self.ingestion.state() != IngestionState::Extracted {
            return Err(AppError::invalid_state("request_quiz", self.state()));
        }
        let text = self.ingestion.extracted_text().to_string();
        self.request.begin_request(text)
    }

    /// 出题结束；成功时题目集合移交给答题控制器
    pub fn complete_quiz_request(
        &mut self,
        ticket: QuizTicket,
        result: AppResult<Vec<Question>>,
    ) -> AppResult<Completion> {
        let outcome = self.request.complete_request(ticket, result)?;
        if outcome == Completion::Applied {
            if let Some(set) = self.request.take_question_set() {
                info!("➡️ 进入答题，共 {} 道题", set.len());
                self.quiz = Some(QuizSessionController::new(set));
            }
        }
        Ok(outcome)
    }

    /// 请求生成测验并等待结果
    pub async fn generate_quiz(&mut self, service: &dyn QuizService) -> AppResult<Completion> {
        let Some(ticket) = self.begin_quiz_request()? else {
            return Ok(Completion::Ignored);
        };
        let result = service.generate(ticket.text()).await;
        self.complete_quiz_request(ticket, result)
    }

    // ========== 答题 ==========

    pub fn select_option(&mut self, question_id: &QuestionId, option: &str) -> AppResult<()> {
        self.active_quiz("select_option")?
            .select_option(question_id, option)
    }

    pub fn can_submit(&self) -> bool {
        self.quiz.as_ref().is_some_and(|q| q.can_submit())
    }

    pub fn submit(&mut self) -> AppResult<Score> {
        self.active_quiz("submit")?.submit()
    }

    /// 回到起点：丢弃文档、文本和测验
    pub fn return_to_start(&mut self) {
        debug!("返回起点，会话重置");
        self.remove_file();
    }

    fn active_quiz(&mut self, operation: &'static str) -> AppResult<&mut QuizSessionController> {
        let state = self.state();
        self.quiz
            .as_mut()
            .ok_or_else(|| AppError::invalid_state(operation, state))
    }
}
