//! Client for the external quiz generation flow.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};
use crate::models::dto::quiz_dto::{GenerateQuizRequest, GeneratedQuizDto};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate(&self, request: &GenerateQuizRequest) -> AppResult<GeneratedQuizDto>;
}

pub struct HttpQuizGenerator {
    base_url: String,
    api_key: Option<SecretString>,
    client: reqwest::Client,
}

impl HttpQuizGenerator {
    pub fn new(base_url: &str, api_key: Option<SecretString>, timeout_secs: u64) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }
}

#[async_trait]
impl QuizGenerator for HttpQuizGenerator {
    async fn generate(&self, request: &GenerateQuizRequest) -> AppResult<GeneratedQuizDto> {
        log::info!(
            "Requesting {} questions for '{}' from generation flow",
            request.question_count,
            request.file_name
        );

        let mut builder = self
            .client
            .post(format!("{}/createQuiz", self.base_url))
            .json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            log::error!("Generation flow request failed: {}", e);
            AppError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Generation flow returned {}: {}", status, body);
            return Err(AppError::GenerationError(format!(
                "AI service responded with status {}",
                status.as_u16()
            )));
        }

        let quiz: GeneratedQuizDto = response.json().await.map_err(|e| {
            log::error!("Generation flow returned malformed quiz: {}", e);
            AppError::GenerationError(format!("AI response validation error: {}", e))
        })?;

        log::info!("Generated quiz '{}' with {} questions", quiz.id, quiz.questions.len());
        Ok(quiz)
    }
}
