use std::sync::Arc;

use crate::{
    auth::can_view_attempt,
    errors::{AppError, AppResult},
    models::{
        domain::AnswerSet,
        dto::response::{QuizAttemptResponse, QuizAttemptReview},
    },
    repositories::{QuizAttemptRepository, QuizRepository},
    services::{
        history::{build_report, HistoryReport},
        scoring::build_attempt,
    },
};

pub struct QuizAttemptService {
    quizzes: Arc<dyn QuizRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
}

impl QuizAttemptService {
    pub fn new(quizzes: Arc<dyn QuizRepository>, attempts: Arc<dyn QuizAttemptRepository>) -> Self {
        Self { quizzes, attempts }
    }

    /// Scores the answers against the stored quiz and records a new attempt.
    pub async fn submit(
        &self,
        owner_id: &str,
        quiz_id: &str,
        answers: AnswerSet,
    ) -> AppResult<QuizAttemptResponse> {
        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        if !quiz.is_visible_to(owner_id) {
            return Err(AppError::Forbidden("This quiz is private".to_string()));
        }

        let attempt = build_attempt(owner_id, &quiz, answers)?;
        let attempt = self.attempts.create(attempt).await?;

        log::info!(
            "Attempt '{}' on quiz '{}' by {}: {}/{} ({}%)",
            attempt.id,
            attempt.quiz_id,
            owner_id,
            attempt.correct,
            attempt.total,
            attempt.score
        );
        Ok(QuizAttemptResponse::from(&attempt))
    }

    /// Review of a past attempt, built from its own question snapshot.
    pub async fn get_attempt(&self, viewer_id: &str, attempt_id: &str) -> AppResult<QuizAttemptReview> {
        let attempt = self
            .attempts
            .find_by_id(attempt_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Attempt with id '{}' not found", attempt_id)))?;

        if !can_view_attempt(viewer_id, &attempt) {
            return Err(AppError::Forbidden(
                "You can only view your own quiz results".to_string(),
            ));
        }

        Ok(QuizAttemptReview::from(&attempt))
    }

    pub async fn history(&self, owner_id: &str) -> AppResult<HistoryReport> {
        let attempts = self.attempts.list_by_owner(owner_id).await?;
        Ok(build_report(&attempts))
    }
}
