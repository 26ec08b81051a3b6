//! 评分
//!
//! 纯函数，只依赖题目集合和冻结后的作答记录

use std::fmt;

use crate::models::{AnswerMap, Question, QuestionSet};

/// 得分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    /// 正确率（0-100）
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 * 100.0 / self.total as f64
    }

    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.correct, self.total)
    }
}

/// 统计作答与答案完全相同的题目数
pub fn score(questions: &QuestionSet, answers: &AnswerMap) -> Score {
    let correct = questions
        .iter()
        .filter(|q| answers.get(&q.id) == Some(q.answer.as_str()))
        .count();

    Score {
        correct,
        total: questions.len(),
    }
}

/// 提交后每个选项的显示分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionVerdict {
    /// 正确答案
    CorrectAnswer,
    /// 用户选了但不是答案
    UserIncorrectChoice,
    /// 其他
    Neutral,
}

/// 对单个选项分类
pub fn classify_option(question: &Question, selected: Option<&str>, option: &str) -> OptionVerdict {
    if option == question.answer {
        OptionVerdict::CorrectAnswer
    } else if selected == Some(option) {
        OptionVerdict::UserIncorrectChoice
    } else {
        OptionVerdict::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionId;

    fn sample_set() -> QuestionSet {
        QuestionSet::new(vec![
            Question {
                id: 1u64.into(),
                question: "2+2?".to_string(),
                options: vec!["3".to_string(), "4".to_string(), "5".to_string()],
                answer: "4".to_string(),
            },
            Question {
                id: 2u64.into(),
                question: "Capital of France?".to_string(),
                options: vec!["Paris".to_string(), "Rome".to_string()],
                answer: "Paris".to_string(),
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_scenario_one_of_two() {
        let answers: AnswerMap = [(1u64, "4"), (2u64, "Rome")].into_iter().collect();
        let result = score(&sample_set(), &answers);
        assert_eq!(result, Score { correct: 1, total: 2 });
        assert_eq!(result.to_string(), "1 / 2");
        assert!((result.percentage() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_order_independent() {
        let set = sample_set();
        let mut reversed: Vec<Question> = set.questions().to_vec();
        reversed.reverse();
        let reversed = QuestionSet::new(reversed).unwrap();

        let answers: AnswerMap = [(2u64, "Paris"), (1u64, "3")].into_iter().collect();
        assert_eq!(score(&set, &answers), score(&reversed, &answers));
    }

    #[test]
    fn test_literal_string_equality() {
        let answers: AnswerMap = [(1u64, "4 "), (2u64, "paris")].into_iter().collect();
        assert_eq!(score(&sample_set(), &answers).correct, 0);
    }

    #[test]
    fn test_classify_options() {
        let set = sample_set();
        let q = set.get(&QuestionId::from(2u64)).unwrap();

        assert_eq!(classify_option(q, Some("Rome"), "Paris"), OptionVerdict::CorrectAnswer);
        assert_eq!(
            classify_option(q, Some("Rome"), "Rome"),
            OptionVerdict::UserIncorrectChoice
        );
        assert_eq!(classify_option(q, Some("Paris"), "Rome"), OptionVerdict::Neutral);
        assert_eq!(classify_option(q, Some("Paris"), "Paris"), OptionVerdict::CorrectAnswer);
    }
}
