//! 出题服务 - 业务能力层
//!
//! 只负责"根据文本生成题目"能力，返回的题目未经校验

use futures::future::BoxFuture;

use crate::clients::ApiClient;
use crate::error::AppResult;
use crate::models::Question;

/// 出题服务
///
/// 职责：
/// - 把完整文本交给出题服务
/// - 原样返回题目列表，校验由流程层负责
pub trait QuizService: Send + Sync {
    fn generate<'a>(&'a self, text: &'a str) -> BoxFuture<'a, AppResult<Vec<Question>>>;
}

impl QuizService for ApiClient {
    fn generate<'a>(&'a self, text: &'a str) -> BoxFuture<'a, AppResult<Vec<Question>>> {
        Box::pin(async move {
            let response = self.generate_quiz(text).await?;
            Ok(response.questions)
        })
    }
}
