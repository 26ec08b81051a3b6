use std::fmt;
use std::path::Path;

use crate::error::{AppError, AppResult, FileError};

/// PDF 的 MIME 类型
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// 用户选中的候选文件，尚未经过类型校验
#[derive(Clone)]
pub struct FileCandidate {
    pub name: String,
    /// 声明的 MIME 类型
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// 从磁盘读取文件，MIME 类型按扩展名推断
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(FileError::NotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            media_type: media_type_for(&name).to_string(),
            name,
            bytes,
        })
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type.eq_ignore_ascii_case(PDF_MEDIA_TYPE)
    }
}

impl fmt::Debug for FileCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileCandidate")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// 按扩展名推断 MIME 类型
pub fn media_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("pdf") => PDF_MEDIA_TYPE,
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("doc") => "application/msword",
        Some("txt") => "text/plain",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// 已接受的 PDF 文档
///
/// 只能通过校验过的 [`FileCandidate`] 构建
#[derive(Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    file: Vec<u8>,
}

impl Document {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.file
    }

    pub fn size(&self) -> usize {
        self.file.len()
    }
}

impl TryFrom<FileCandidate> for Document {
    type Error = AppError;

    fn try_from(candidate: FileCandidate) -> AppResult<Self> {
        if !candidate.is_pdf() {
            return Err(crate::error::ValidationError::NotPdf {
                name: candidate.name,
                media_type: candidate.media_type,
            }
            .into());
        }

        Ok(Self {
            name: candidate.name,
            file: candidate.bytes,
        })
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("name", &self.name)
            .field("size", &self.file.len())
            .finish()
    }
}
