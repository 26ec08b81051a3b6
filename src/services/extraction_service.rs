//! 文本提取服务 - 业务能力层
//!
//! 只负责"把 PDF 变成文本"能力，不关心状态流转

use futures::future::BoxFuture;
use tracing::{debug, info};

use crate::clients::ApiClient;
use crate::error::AppResult;
use crate::models::Document;

/// 文本提取服务
///
/// 职责：
/// - 上传单个文档并返回提取出的文本
/// - 不持有文档
/// - 不关心会话状态
pub trait ExtractionService: Send + Sync {
    fn extract<'a>(&'a self, document: &'a Document) -> BoxFuture<'a, AppResult<String>>;
}

impl ExtractionService for ApiClient {
    fn extract<'a>(&'a self, document: &'a Document) -> BoxFuture<'a, AppResult<String>> {
        Box::pin(async move {
            let response = self.upload(document).await?;
            if let Some(filename) = &response.filename {
                info!("服务端已接收文件: {}", filename);
            }
            debug!("提取文本共 {} 字符", response.content.chars().count());
            Ok(response.content)
        })
    }
}
