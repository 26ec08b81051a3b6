use std::collections::HashMap;

use crate::models::question::QuestionId;

/// 用户作答记录：题目 ID → 最近一次选择的选项
///
/// 只有被点选过的题目才有记录，缺失即未作答
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerMap {
    selections: HashMap<QuestionId, String>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录选择，覆盖之前的选择
    pub fn select(&mut self, id: QuestionId, option: impl Into<String>) -> Option<String> {
        self.selections.insert(id, option.into())
    }

    pub fn get(&self, id: &QuestionId) -> Option<&str> {
        self.selections.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.selections.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

impl<I: Into<QuestionId>, S: Into<String>> FromIterator<(I, S)> for AnswerMap {
    fn from_iter<T: IntoIterator<Item = (I, S)>>(iter: T) -> Self {
        Self {
            selections: iter
                .into_iter()
                .map(|(id, option)| (id.into(), option.into()))
                .collect(),
        }
    }
}
