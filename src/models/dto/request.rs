use async_graphql::InputObject;
use serde::Deserialize;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::AnswerSet;

/// Query string accompanying a raw PDF upload. Kept as strings so that a
/// malformed count gets our own message instead of a generic 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateQuizParams {
    pub question_count: Option<String>,
    pub file_name: Option<String>,
}

/// An uploaded document as received at the boundary, before validation.
#[derive(Debug, Clone, Default)]
pub struct QuizUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    pub question_count: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct RenameQuizInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
}

impl RenameQuizInput {
    pub fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, InputObject)]
pub struct PinQuizInput {
    pub pinned: bool,
}

#[derive(Debug, Clone, Deserialize, InputObject)]
pub struct AnswerInput {
    pub question_id: String,
    pub selected_option_index: i32,
}

/// REST body: `{"answers": {"<question id>": <option index>}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitAnswersRequest {
    #[serde(default)]
    pub answers: AnswerSet,
}

#[derive(Debug, Clone, Deserialize, InputObject)]
pub struct SubmitQuizAttemptInput {
    pub quiz_id: String,
    pub answers: Vec<AnswerInput>,
}

impl SubmitQuizAttemptInput {
    pub fn to_answer_set(&self) -> AppResult<AnswerSet> {
        let mut answers = AnswerSet::new();
        for answer in &self.answers {
            if answers
                .select(&answer.question_id, answer.selected_option_index)
                .is_some()
            {
                return Err(AppError::ValidationError(format!(
                    "Question '{}' was answered more than once",
                    answer.question_id
                )));
            }
        }
        Ok(answers)
    }
}
