use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuizQuestion {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer_index: i32, // zero-based into `options`
}

impl QuizQuestion {
    pub fn new(id: &str, text: &str, options: &[&str], correct_answer_index: i32) -> Self {
        QuizQuestion {
            id: id.to_string(),
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer_index,
        }
    }

    /// A missing selection never matches.
    pub fn is_answered_correctly(&self, selected: Option<i32>) -> bool {
        selected == Some(self.correct_answer_index)
    }

    pub fn has_valid_answer_key(&self) -> bool {
        !self.options.is_empty()
            && self.correct_answer_index >= 0
            && (self.correct_answer_index as usize) < self.options.len()
    }
}
