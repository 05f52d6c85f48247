use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_question::QuizQuestion;

/// Selected option index per question id. Stored as a sub-document keyed by question id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, i32>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous selection for the question, if any.
    pub fn select(&mut self, question_id: &str, option_index: i32) -> Option<i32> {
        self.0.insert(question_id.to_string(), option_index)
    }

    pub fn selected(&self, question_id: &str) -> Option<i32> {
        self.0.get(question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, i32)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, i32)>>(iter: I) -> Self {
        AnswerSet(iter.into_iter().collect())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub id: String,
    pub quiz_id: String,
    pub owner_id: String,
    pub quiz_title: String,
    pub answers: AnswerSet,
    pub correct: i32,
    pub total: i32,
    pub score: i32,
    pub questions_snapshot: Vec<QuizQuestion>,
    pub submitted_at: DateTime<Utc>,
}

impl QuizAttempt {
    pub fn incorrect(&self) -> i32 {
        self.total - self.correct
    }
}
