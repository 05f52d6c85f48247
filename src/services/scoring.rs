//! Per-submission scoring.
//!
//! Scoring is permissive: a question without an entry in the answer set is
//! counted as incorrect, and entries for unknown question ids are ignored.
//! Completeness of a submission is never validated here.

use async_graphql::Enum;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{AnswerSet, Quiz, QuizAttempt, QuizQuestion};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub correct: i32,
    pub total: i32,
    pub score: i32,
}

/// Qualitative label shown next to a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl ScoreBand {
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 90 => ScoreBand::Excellent,
            s if s >= 80 => ScoreBand::Good,
            s if s >= 60 => ScoreBand::Fair,
            _ => ScoreBand::NeedsImprovement,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// `round(100 * part / whole)` with halves rounded up; `0` when `whole` is not positive.
pub fn percentage(part: i64, whole: i64) -> i32 {
    if whole <= 0 {
        return 0;
    }
    ((200 * part + whole) / (2 * whole)) as i32
}

pub fn score_answers(questions: &[QuizQuestion], answers: &AnswerSet) -> ScoreResult {
    let total = questions.len() as i32;
    let correct = questions
        .iter()
        .filter(|q| q.is_answered_correctly(answers.selected(&q.id)))
        .count() as i32;

    ScoreResult {
        correct,
        total,
        score: percentage(correct as i64, total as i64),
    }
}

/// Scores a submission and produces the immutable attempt record to persist.
///
/// Every call yields a new attempt id; resubmitting creates another attempt.
pub fn build_attempt(owner_id: &str, quiz: &Quiz, answers: AnswerSet) -> AppResult<QuizAttempt> {
    if owner_id.trim().is_empty() {
        return Err(AppError::Unauthorized(
            "An authenticated user is required to submit a quiz".to_string(),
        ));
    }

    let result = score_answers(&quiz.questions, &answers);

    Ok(QuizAttempt {
        id: Uuid::new_v4().to_string(),
        quiz_id: quiz.id.clone(),
        owner_id: owner_id.to_string(),
        quiz_title: quiz.title.clone(),
        answers,
        correct: result.correct,
        total: result.total,
        score: result.score,
        questions_snapshot: quiz.questions.clone(),
        submitted_at: Utc::now(),
    })
}
