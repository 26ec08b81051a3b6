//! # PDF Quiz Client
//!
//! 上传 PDF、获取提取文本、生成选择题测验并即时评分的客户端
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - HTTP 调用，`ApiClient` 对接 `/api/upload` 和 `/api/generate-quiz`
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `ExtractionService` - PDF → 文本
//! - `QuizService` - 文本 → 题目
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 会话状态机
//! - `IngestionController` / `QuizRequestController` / `QuizSessionController`
//! - `Session` - 独占三个控制器，负责按值移交
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 终端前端，驱动 `Session`
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::ApiClient;
pub use config::Config;
pub use error::{AppError, AppResult, ErrorKind};
pub use models::{Document, FileCandidate, Question, QuestionId, QuestionSet, SessionState};
pub use orchestrator::{App, RunOutcome};
pub use services::{ExtractionService, QuizService};
pub use workflow::{Completion, QuizView, Score, Session};
