/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

use crate::config::Config;
use crate::workflow::Score;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - PDF 测验生成");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 后端地址: {}", config.api_base_url);
    info!("⏱️ 请求超时: {} 秒", config.request_timeout_secs);
    if let Some(n) = config.num_questions {
        info!("📋 期望题目数: {}", n);
    }
    info!("{}", "=".repeat(60));
}

/// 记录提取结果
///
/// # 参数
/// - `file_name`: 文件名
/// - `text`: 提取文本
/// - `preview_chars`: 预览字符数
pub fn log_extracted(file_name: &str, text: &str, preview_chars: usize) {
    info!("✓ {} 提取完成，共 {} 字符", file_name, text.chars().count());
    info!("📄 预览: {}", truncate_text(text, preview_chars));
}

/// 打印最终得分
pub fn log_score(score: &Score) {
    info!("\n{}", "=".repeat(60));
    info!("📊 测验完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 得分: {} ({:.0}%)", score, score.percentage());
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本，换行被替换为空格
pub fn truncate_text(text: &str, max_len: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.chars().count() > max_len {
        flat.chars().take(max_len).collect::<String>() + "..."
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_text("中文题目内容", 4), "中文题目...");
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a\nb", 10), "a b");
    }
}
