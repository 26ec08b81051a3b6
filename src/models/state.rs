use std::fmt;

/// 会话整体状态
///
/// 由三个控制器的状态合成，任一时刻只有一个取值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// 尚未选择文件
    NoDocument,
    /// 已选择 PDF，等待上传
    DocumentSelected,
    /// 正在上传并提取文本
    Uploading,
    /// 文本提取成功
    Extracted,
    /// 上传或提取失败
    UploadFailed,
    /// 正在生成测验
    GeneratingQuiz,
    /// 测验进行中
    QuizReady,
    /// 测验已提交并评分
    QuizSubmitted,
}

impl SessionState {
    pub fn name(self) -> &'static str {
        match self {
            SessionState::NoDocument => "NoDocument",
            SessionState::DocumentSelected => "DocumentSelected",
            SessionState::Uploading => "Uploading",
            SessionState::Extracted => "Extracted",
            SessionState::UploadFailed => "UploadFailed",
            SessionState::GeneratingQuiz => "GeneratingQuiz",
            SessionState::QuizReady => "QuizReady",
            SessionState::QuizSubmitted => "QuizSubmitted",
        }
    }

    /// 是否有网络请求在途
    pub fn is_busy(self) -> bool {
        matches!(self, SessionState::Uploading | SessionState::GeneratingQuiz)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
