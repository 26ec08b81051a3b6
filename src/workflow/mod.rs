//! 流程层（Workflow）
//!
//! 三个控制器加一个评分函数，线性组合：
//! - `ingestion` - 文档选择、上传、提取
//! - `quiz_request` - 文本 → 题目集合
//! - `quiz_session` - 作答、提交、评分
//! - `session` - 持有以上三者，负责按值移交

pub mod ingestion;
pub mod quiz_request;
pub mod quiz_session;
pub mod scoring;
pub mod session;

pub use ingestion::{IngestionController, IngestionState, UploadTicket};
pub use quiz_request::{QuizRequestController, QuizRequestState, QuizTicket};
pub use quiz_session::QuizSessionController;
pub use scoring::{classify_option, score, OptionVerdict, Score};
pub use session::{QuizView, Session};

/// 异步请求完成后的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// 结果已应用到当前状态
    Applied,
    /// 结果已过期被丢弃，或调用本身是空操作
    Ignored,
}
