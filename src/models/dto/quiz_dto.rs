//! Wire shapes of the external quiz generation flow.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::domain::QuizQuestion;

/// Body sent to the generation flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    pub pdf_data_uri: String,
    pub question_count: i32,
    pub file_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestionDto {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer_index: i32,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuizDto {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub question_count: i32,
    pub questions: Vec<GeneratedQuestionDto>,
}

impl From<GeneratedQuestionDto> for QuizQuestion {
    fn from(dto: GeneratedQuestionDto) -> Self {
        QuizQuestion {
            id: dto.id,
            text: dto.text,
            options: dto.options,
            correct_answer_index: dto.correct_answer_index,
        }
    }
}

impl GeneratedQuizDto {
    /// Rejects output the scorer could not grade consistently.
    pub fn ensure_usable(&self) -> AppResult<()> {
        if self.id.trim().is_empty() || self.questions.is_empty() {
            return Err(AppError::GenerationError(
                "AI failed to generate valid quiz content (incomplete/empty)".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(AppError::GenerationError(format!(
                    "AI response validation error: duplicate question id '{}'",
                    question.id
                )));
            }

            let in_range = question.correct_answer_index >= 0
                && (question.correct_answer_index as usize) < question.options.len();
            if !in_range {
                return Err(AppError::GenerationError(format!(
                    "AI response validation error: question '{}' has no valid correct option",
                    question.id
                )));
            }
        }

        Ok(())
    }

    pub fn into_questions(self) -> Vec<QuizQuestion> {
        self.questions.into_iter().map(QuizQuestion::from).collect()
    }
}

pub fn generated_quiz_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(GeneratedQuizDto)).unwrap_or_default()
}
