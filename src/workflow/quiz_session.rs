//! 答题控制器
//!
//! 持有不可变的题目集合和作答记录，负责选择、提交门控和评分

use tracing::{debug, info};

use crate::error::{AppResult, PreconditionError, ValidationError};
use crate::models::{AnswerMap, QuestionId, QuestionSet};
use crate::workflow::scoring::{self, OptionVerdict, Score};

/// 答题控制器
#[derive(Debug, Clone)]
pub struct QuizSessionController {
    questions: QuestionSet,
    answers: AnswerMap,
    /// 提交后写入，同时代表作答记录已冻结
    result: Option<Score>,
}

impl QuizSessionController {
    /// 用移交过来的题目集合开始答题
    pub fn new(questions: QuestionSet) -> Self {
        Self {
            questions,
            answers: AnswerMap::new(),
            result: None,
        }
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn is_submitted(&self) -> bool {
        self.result.is_some()
    }

    /// 选择选项，后选覆盖先选；提交后调用不生效
    pub fn select_option(&mut self, question_id: &QuestionId, option: &str) -> AppResult<()> {
        if self.is_submitted() {
            debug!("测验已提交，忽略对题目 {} 的选择", question_id);
            return Ok(());
        }

        let question = self.questions.get(question_id).ok_or_else(|| {
            ValidationError::UnknownQuestion {
                question_id: question_id.to_string(),
            }
        })?;

        if !question.has_option(option) {
            return Err(ValidationError::OptionNotInQuestion {
                question_id: question_id.to_string(),
                option: option.to_string(),
            }
            .into());
        }

        self.answers.select(question_id.clone(), option);
        Ok(())
    }

    /// 所有题目都有作答时才能提交
    pub fn can_submit(&self) -> bool {
        self.questions.iter().all(|q| self.answers.contains(&q.id))
    }

    /// 已作答题数
    pub fn answered(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.answers.contains(&q.id))
            .count()
    }

    /// 提交并评分，作答记录随之冻结
    pub fn submit(&mut self) -> AppResult<Score> {
        if self.is_submitted() {
            return Err(PreconditionError::AlreadySubmitted.into());
        }
        if !self.can_submit() {
            return Err(PreconditionError::Incomplete {
                answered: self.answered(),
                total: self.questions.len(),
            }
            .into());
        }

        let result = scoring::score(&self.questions, &self.answers);
        info!("📝 测验已提交，得分 {}", result);
        self.result = Some(result);
        Ok(result)
    }

    /// 提交后的得分
    pub fn score(&self) -> Option<Score> {
        self.result
    }

    /// 提交后某个选项的显示分类，提交前返回 `None`
    pub fn option_verdict(&self, question_id: &QuestionId, option: &str) -> Option<OptionVerdict> {
        if !self.is_submitted() {
            return None;
        }
        let question = self.questions.get(question_id)?;
        Some(scoring::classify_option(
            question,
            self.answers.get(question_id),
            option,
        ))
    }
}
