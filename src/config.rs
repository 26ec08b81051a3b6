use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult, ConfigError};

/// 程序配置
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 后端服务地址（提取服务和出题服务共用）
    pub api_base_url: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 期望生成的题目数量，不设置时由服务端决定
    pub num_questions: Option<u32>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 日志和终端中提取文本预览的字符数
    pub preview_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8088".to_string(),
            request_timeout_secs: 120,
            num_questions: None,
            verbose_logging: false,
            preview_chars: 80,
        }
    }
}

impl Config {
    /// 从环境变量加载，缺省项使用默认值
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 先读取 TOML 配置文件（不存在则使用默认值），再用环境变量覆盖
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let base = if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
            Self::from_toml_str(&content).map_err(|e| match e {
                AppError::Config(ConfigError::TomlParseFailed { source, .. }) => {
                    AppError::Config(ConfigError::TomlParseFailed {
                        path: path.display().to_string(),
                        source,
                    })
                }
                other => other,
            })?
        } else {
            tracing::debug!("配置文件 {} 不存在，使用默认配置", path.display());
            Self::default()
        };

        let config = base.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 解析 TOML 文本
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            api_base_url: std::env::var("QUIZ_API_BASE_URL").unwrap_or(self.api_base_url),
            request_timeout_secs: std::env::var("QUIZ_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.request_timeout_secs),
            num_questions: std::env::var("QUIZ_NUM_QUESTIONS").ok().and_then(|v| v.parse().ok()).or(self.num_questions),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            preview_chars: std::env::var("QUIZ_PREVIEW_CHARS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.preview_chars),
        }
    }

    /// 校验配置
    pub fn validate(&self) -> AppResult<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "api_base_url".to_string(),
                reason: "不能为空".to_string(),
            }
            .into());
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs".to_string(),
                reason: "必须大于 0".to_string(),
            }
            .into());
        }
        if self.num_questions == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "num_questions".to_string(),
                reason: "必须大于 0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// 拼接接口地址
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
