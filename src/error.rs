use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 本地输入错误（文件类型、非法选项）
    #[error("输入校验失败: {0}")]
    Validation(#[from] ValidationError),
    /// 在错误的状态下调用了操作
    #[error("前置条件不满足: {0}")]
    Precondition(#[from] PreconditionError),
    /// 网络或非 2xx 响应
    #[error("网络错误: {0}")]
    Transport(#[from] TransportError),
    /// 服务端返回的数据违反数据模型约束
    #[error("响应数据异常: {0}")]
    Malformed(#[from] MalformedResponseError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// 错误类别，供界面层和测试判断
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Precondition,
    Transport,
    Malformed,
    Config,
    File,
}

/// 本地输入错误
#[derive(Debug, Error)]
pub enum ValidationError {
    /// 选择的文件不是 PDF
    #[error("只接受 PDF 文件: {name} ({media_type})")]
    NotPdf { name: String, media_type: String },
    /// 选项不属于该题
    #[error("选项 '{option}' 不属于题目 {question_id}")]
    OptionNotInQuestion { question_id: String, option: String },
    /// 题目不存在
    #[error("题目 {question_id} 不存在")]
    UnknownQuestion { question_id: String },
}

/// 状态前置条件错误
#[derive(Debug, Error)]
pub enum PreconditionError {
    /// 当前状态不允许执行该操作
    #[error("当前状态 {state} 不允许执行 {operation}")]
    InvalidState {
        operation: &'static str,
        state: String,
    },
    /// 提取文本为空，无法生成测验
    #[error("提取文本为空，无法生成测验")]
    EmptyText,
    /// 尚未作答完所有题目
    #[error("还有题目未作答 (已答 {answered}/{total})")]
    Incomplete { answered: usize, total: usize },
    /// 已经提交过
    #[error("测验已提交")]
    AlreadySubmitted,
}

/// 网络错误
#[derive(Debug, Error)]
pub enum TransportError {
    /// 请求发送失败（连接、超时等）
    #[error("请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 服务端返回非 2xx 状态码
    #[error("服务端返回错误状态 ({endpoint}): {status}, {body}")]
    BadStatus {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// 响应体无法解析
    #[error("响应体解析失败 ({endpoint}): {source}")]
    DecodeFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 服务端数据违反约束
#[derive(Debug, Error)]
pub enum MalformedResponseError {
    /// 题目列表为空
    #[error("题目列表为空")]
    EmptyQuestionSet,
    /// 选项少于两个
    #[error("题目 {question_id} 只有 {count} 个选项")]
    TooFewOptions { question_id: String, count: usize },
    /// 选项重复
    #[error("题目 {question_id} 存在重复选项 '{option}'")]
    DuplicateOption { question_id: String, option: String },
    /// 答案不在选项中
    #[error("题目 {question_id} 的答案 '{answer}' 不在选项中")]
    AnswerNotInOptions { question_id: String, answer: String },
    /// 题目 ID 重复
    #[error("题目 ID {question_id} 重复")]
    DuplicateQuestionId { question_id: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置项取值非法
    #[error("配置项 {key} 取值非法: {reason}")]
    InvalidValue { key: String, reason: String },
    /// TOML 解析失败
    #[error("TOML 解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// 错误类别
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Precondition(_) => ErrorKind::Precondition,
            AppError::Transport(_) => ErrorKind::Transport,
            AppError::Malformed(_) => ErrorKind::Malformed,
            AppError::Config(_) => ErrorKind::Config,
            AppError::File(_) => ErrorKind::File,
        }
    }

    /// 是否可以通过重试同一网络操作恢复
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Transport(_) | AppError::Malformed(_))
    }
}

// ========== 从常见错误类型转换 ==========

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err
            .url()
            .map(|u| u.path().to_string())
            .unwrap_or_default();
        if err.is_decode() {
            AppError::Transport(TransportError::DecodeFailed {
                endpoint,
                source: Box::new(err),
            })
        } else {
            AppError::Transport(TransportError::RequestFailed {
                endpoint,
                source: Box::new(err),
            })
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Transport(TransportError::DecodeFailed {
            endpoint: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(ConfigError::TomlParseFailed {
            path: String::new(), // TOML 错误本身不带路径
            source: err,
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: err,
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建状态不匹配错误
    pub fn invalid_state(operation: &'static str, state: impl std::fmt::Display) -> Self {
        AppError::Precondition(PreconditionError::InvalidState {
            operation,
            state: state.to_string(),
        })
    }

    /// 创建请求失败错误
    pub fn request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Transport(TransportError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建非 2xx 状态错误
    pub fn bad_status(endpoint: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        AppError::Transport(TransportError::BadStatus {
            endpoint: endpoint.into(),
            status,
            body: body.into(),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
