//! 出题请求控制器
//!
//! 负责从提取文本到题目集合的转换，失败时退回接入状态，文本保留可直接重试

use std::fmt;

use tracing::{debug, info, warn};

use crate::error::{AppResult, PreconditionError};
use crate::models::{Question, QuestionSet};
use crate::services::QuizService;
use crate::workflow::Completion;

/// 出题请求状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizRequestState {
    Idle,
    Requesting,
    Ready,
    Failed,
}

impl fmt::Display for QuizRequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// 在途出题请求的凭证，持有交给服务端的文本
#[derive(Debug, Clone)]
pub struct QuizTicket {
    generation: u64,
    text: String,
}

impl QuizTicket {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// 出题请求控制器
#[derive(Debug)]
pub struct QuizRequestController {
    state: QuizRequestState,
    question_set: Option<QuestionSet>,
    generation: u64,
    last_error: Option<String>,
}

impl Default for QuizRequestController {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizRequestController {
    pub fn new() -> Self {
        Self {
            state: QuizRequestState::Idle,
            question_set: None,
            generation: 0,
            last_error: None,
        }
    }

    pub fn state(&self) -> QuizRequestState {
        self.state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn question_set(&self) -> Option<&QuestionSet> {
        self.question_set.as_ref()
    }

    /// 开始出题请求
    ///
    /// # 参数
    /// - `text`: 提取文本，按值移交
    ///
    /// # 返回
    /// - `Ok(Some(ticket))`: 已进入 `Requesting`
    /// - `Ok(None)`: 已有请求在途，不做任何事
    /// - `Err`: 文本为空
    pub fn begin_request(&mut self, text: String) -> AppResult<Option<QuizTicket>> {
        if self.state == QuizRequestState::Requesting {
            debug!("已有出题请求在途，忽略本次请求");
            return Ok(None);
        }
        if text.is_empty() {
            return Err(PreconditionError::EmptyText.into());
        }

        info!("🤖 请求生成测验，文本 {} 字符", text.chars().count());
        self.generation += 1;
        self.state = QuizRequestState::Requesting;
        self.question_set = None;
        self.last_error = None;

        Ok(Some(QuizTicket {
            generation: self.generation,
            text,
        }))
    }

    /// 出题请求结束，校验并应用结果
    ///
    /// 题目集合不满足约束时按失败处理，集合不会被采用。
    pub fn complete_request(
        &mut self,
        ticket: QuizTicket,
        result: AppResult<Vec<Question>>,
    ) -> AppResult<Completion> {
        if ticket.generation != self.generation || self.state != QuizRequestState::Requesting {
            debug!(
                "丢弃过期的出题结果 (凭证代数 {}, 当前代数 {})",
                ticket.generation, self.generation
            );
            return Ok(Completion::Ignored);
        }

        match result.and_then(QuestionSet::new) {
            Ok(set) => {
                info!("✓ 测验生成成功，共 {} 道题", set.len());
                self.question_set = Some(set);
                self.state = QuizRequestState::Ready;
                Ok(Completion::Applied)
            }
            Err(e) => {
                warn!("❌ 测验生成失败: {}", e);
                self.last_error = Some(e.to_string());
                self.state = QuizRequestState::Failed;
                Err(e)
            }
        }
    }

    /// 发起请求并等待结果
    pub async fn request(
        &mut self,
        text: String,
        service: &dyn QuizService,
    ) -> AppResult<Completion> {
        let Some(ticket) = self.begin_request(text)? else {
            return Ok(Completion::Ignored);
        };
        let result = service.generate(ticket.text()).await;
        self.complete_request(ticket, result)
    }

    /// 取走题目集合，控制器回到 `Idle`
    pub fn take_question_set(&mut self) -> Option<QuestionSet> {
        let set = self.question_set.take();
        if set.is_some() {
            self.state = QuizRequestState::Idle;
        }
        set
    }

    /// 重置，在途请求的结果将被丢弃
    pub fn reset(&mut self) {
        self.generation += 1;
        self.question_set = None;
        self.last_error = None;
        self.state = QuizRequestState::Idle;
    }
}
