//! 编排层（Orchestration Layer）
//!
//! 终端前端：把用户输入翻译为 `Session` 操作，并把会话状态渲染出来
//!
//! ```text
//! App (终端交互)
//!     ↓
//! workflow::Session (三个控制器 + 按值移交)
//!     ↓
//! services (能力层：提取 / 出题)
//!     ↓
//! clients (HTTP)
//! ```

pub mod app;
pub mod prompt;
pub mod view;

pub use app::{App, RunOutcome};
pub use prompt::Prompt;
