//! 终端渲染
//!
//! 只做展示，所有内容都从会话状态推导

use crate::models::Question;
use crate::workflow::{OptionVerdict, QuizSessionController};

/// 没有有效题目移交时的兜底页
pub fn render_no_questions() -> String {
    "没有找到题目。\n按回车返回首页".to_string()
}

/// 渲染完整的提取文本，不做截断
pub fn render_extracted(file_name: &str, text: &str) -> String {
    let mut out = format!("\n===== 提取文本: {} ({} 字符) =====\n", file_name, text.chars().count());
    out.push_str(text);
    if !text.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("=====\n");
    out
}

/// 渲染单道题
///
/// 提交后会在选项后标注 ✓ / ✗
pub fn render_question(index: usize, question: &Question, quiz: &QuizSessionController) -> String {
    let mut out = format!("\n{}. {}\n", index + 1, question.question);
    let selected = quiz.answers().get(&question.id);

    for (i, option) in question.options.iter().enumerate() {
        let cursor = if selected == Some(option.as_str()) { ">" } else { " " };
        let marker = match quiz.option_verdict(&question.id, option) {
            Some(OptionVerdict::CorrectAnswer) => " ✓",
            Some(OptionVerdict::UserIncorrectChoice) => " ✗",
            Some(OptionVerdict::Neutral) | None => "",
        };
        out.push_str(&format!("  {} [{}] {}{}\n", cursor, i + 1, option, marker));
    }
    out
}

/// 渲染整份测验的批改结果
pub fn render_results(quiz: &QuizSessionController) -> String {
    let mut out = String::new();
    for (i, q) in quiz.questions().iter().enumerate() {
        out.push_str(&render_question(i, q, quiz));
    }
    if let Some(score) = quiz.score() {
        out.push_str(&format!("\n你的得分: {}\n", score));
    }
    out
}

/// 解析用户输入的选项编号（从 1 开始）
///
/// # 返回
/// 返回 0-based 下标，非法输入返回 `None`
pub fn parse_choice(input: &str, option_count: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    if (1..=option_count).contains(&n) {
        Some(n - 1)
    } else {
        None
    }
}
