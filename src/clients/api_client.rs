/// 后端 API 客户端
///
/// 封装所有与提取服务、出题服务相关的 HTTP 调用
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{
    Document, GenerateQuizRequest, GenerateQuizResponse, UploadResponse, PDF_MEDIA_TYPE,
};

pub const UPLOAD_PATH: &str = "/api/upload";
pub const GENERATE_QUIZ_PATH: &str = "/api/generate-quiz";

/// 后端 API 客户端
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: Config,
}

impl ApiClient {
    /// 创建新的 API 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// 上传 PDF，返回提取结果
    ///
    /// # 参数
    /// - `document`: 已通过类型校验的文档
    ///
    /// # 返回
    /// 返回服务端的 `{ content }` 响应
    pub async fn upload(&self, document: &Document) -> AppResult<UploadResponse> {
        let url = self.config.endpoint(UPLOAD_PATH);
        debug!("上传文件 {} ({} 字节) 到 {}", document.name(), document.size(), url);

        let part = Part::bytes(document.bytes().to_vec())
            .file_name(document.name().to_string())
            .mime_str(PDF_MEDIA_TYPE)?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::request_failed(UPLOAD_PATH, e))?;

        let body: UploadResponse = Self::parse_json(UPLOAD_PATH, response).await?;
        debug!("提取文本长度: {} 字符", body.content.chars().count());
        Ok(body)
    }

    /// 请求生成测验，返回未经校验的题目列表
    ///
    /// # 参数
    /// - `text`: 完整的提取文本
    pub async fn generate_quiz(&self, text: &str) -> AppResult<GenerateQuizResponse> {
        let url = self.config.endpoint(GENERATE_QUIZ_PATH);
        debug!("请求生成测验，文本长度: {} 字符", text.chars().count());

        let payload = GenerateQuizRequest {
            text,
            num_questions: self.config.num_questions,
        };

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::request_failed(GENERATE_QUIZ_PATH, e))?;

        let body: GenerateQuizResponse = Self::parse_json(GENERATE_QUIZ_PATH, response).await?;
        debug!("服务端返回 {} 道题目", body.questions.len());
        Ok(body)
    }

    /// 检查后端是否在线
    pub async fn health_check(&self) -> AppResult<()> {
        let url = self.config.endpoint("/");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::request_failed("/", e))?;

        if !response.status().is_success() {
            return Err(AppError::bad_status("/", response.status().as_u16(), ""));
        }
        Ok(())
    }

    /// 非 2xx 视为失败，成功时解析 JSON
    async fn parse_json<T: DeserializeOwned>(endpoint: &str, response: Response) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} 返回状态 {}: {}", endpoint, status, body);
            return Err(AppError::bad_status(endpoint, status.as_u16(), body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::request_failed(endpoint, e))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            warn!("{} 响应体解析失败: {}", endpoint, e);
            AppError::Transport(crate::error::TransportError::DecodeFailed {
                endpoint: endpoint.to_string(),
                source: Box::new(e),
            })
        })
    }
}
