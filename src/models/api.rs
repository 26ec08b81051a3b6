//! 与后端交互的请求/响应结构

use serde::{Deserialize, Serialize};

use crate::models::question::Question;

/// `POST /api/upload` 响应
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub content: String,
    /// 服务端回显的文件名
    #[serde(default)]
    pub filename: Option<String>,
}

/// `POST /api/generate-quiz` 请求
#[derive(Debug, Clone, Serialize)]
pub struct GenerateQuizRequest<'a> {
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_questions: Option<u32>,
}

/// `POST /api/generate-quiz` 响应，题目未经校验
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateQuizResponse {
    pub questions: Vec<Question>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_unset_count() {
        let body = serde_json::to_value(GenerateQuizRequest {
            text: "hello",
            num_questions: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "text": "hello" }));
    }

    #[test]
    fn test_upload_response_tolerates_filename() {
        let resp: UploadResponse =
            serde_json::from_str(r#"{"filename": "a.pdf", "content": "line1\nline2"}"#).unwrap();
        assert_eq!(resp.content, "line1\nline2");
        assert_eq!(resp.filename.as_deref(), Some("a.pdf"));

        let resp: UploadResponse = serde_json::from_str(r#"{"content": ""}"#).unwrap();
        assert!(resp.filename.is_none());
    }
}
