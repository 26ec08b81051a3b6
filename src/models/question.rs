use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppResult, MalformedResponseError};

/// 题目 ID
///
/// 服务端可能返回整数或字符串，统一保存为字符串
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for QuestionId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Visitor;

        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = QuestionId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer question id")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(QuestionId(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(QuestionId(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(QuestionId(value.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// 单道选择题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl Question {
    /// 选项是否属于本题
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// 校验：至少两个选项、选项不重复、答案在选项中
    pub fn validate(&self) -> AppResult<()> {
        let question_id = self.id.to_string();

        if self.options.len() < 2 {
            return Err(MalformedResponseError::TooFewOptions {
                question_id,
                count: self.options.len(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.as_str()) {
                return Err(MalformedResponseError::DuplicateOption {
                    question_id,
                    option: option.clone(),
                }
                .into());
            }
        }

        if !self.has_option(&self.answer) {
            return Err(MalformedResponseError::AnswerNotInOptions {
                question_id,
                answer: self.answer.clone(),
            }
            .into());
        }

        Ok(())
    }
}

/// 已校验的题目集合，保持服务端给出的顺序
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionSet(Vec<Question>);

impl QuestionSet {
    /// 校验并构建题目集合，任何一道题不合法都拒绝整个集合
    pub fn new(questions: Vec<Question>) -> AppResult<Self> {
        if questions.is_empty() {
            return Err(MalformedResponseError::EmptyQuestionSet.into());
        }

        let mut ids = HashSet::new();
        for q in &questions {
            q.validate()?;
            if !ids.insert(&q.id) {
                return Err(MalformedResponseError::DuplicateQuestionId {
                    question_id: q.id.to_string(),
                }
                .into());
            }
        }

        Ok(Self(questions))
    }

    pub fn questions(&self) -> &[Question] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.0.iter().find(|q| &q.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.0.iter()
    }
}

impl TryFrom<Vec<Question>> for QuestionSet {
    type Error = crate::error::AppError;

    fn try_from(questions: Vec<Question>) -> AppResult<Self> {
        Self::new(questions)
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
