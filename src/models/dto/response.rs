use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Quiz, QuizAttempt, QuizQuestion, SourceDocument};
use crate::services::scoring::ScoreBand;

/// A question as shown to someone taking the quiz: no answer key.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuestionForTaking {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizForTaking {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub question_count: i32,
    pub questions: Vec<QuestionForTaking>,
    pub created_at: DateTime<Utc>,
}

impl From<&QuizQuestion> for QuestionForTaking {
    fn from(question: &QuizQuestion) -> Self {
        QuestionForTaking {
            id: question.id.clone(),
            text: question.text.clone(),
            options: question.options.clone(),
        }
    }
}

impl From<&Quiz> for QuizForTaking {
    fn from(quiz: &Quiz) -> Self {
        QuizForTaking {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            question_count: quiz.question_count,
            questions: quiz.questions.iter().map(QuestionForTaking::from).collect(),
            created_at: quiz.created_at,
        }
    }
}

/// Owner-facing listing entry.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub question_count: i32,
    pub created_at: DateTime<Utc>,
    pub is_public: bool,
    pub is_pinned: bool,
    pub share_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_document: Option<SourceDocument>,
}

impl QuizSummary {
    pub fn from_quiz(quiz: &Quiz, public_base_url: &str) -> Self {
        QuizSummary {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            question_count: quiz.question_count,
            created_at: quiz.created_at,
            is_public: quiz.is_public,
            is_pinned: quiz.is_pinned,
            share_url: format!("{}/quiz/{}", public_base_url.trim_end_matches('/'), quiz.id),
            source_document: quiz.source_document.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, SimpleObject)]
pub struct MyQuizzesResponse {
    pub pinned: Vec<QuizSummary>,
    pub others: Vec<QuizSummary>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizAttemptResponse {
    pub id: String,
    pub quiz_id: String,
    pub quiz_title: String,
    pub correct: i32,
    pub incorrect: i32,
    pub total: i32,
    pub score: i32,
    pub band: ScoreBand,
    pub band_label: String,
    pub submitted_at: DateTime<Utc>,
}

impl From<&QuizAttempt> for QuizAttemptResponse {
    fn from(attempt: &QuizAttempt) -> Self {
        let band = ScoreBand::from_score(attempt.score);
        QuizAttemptResponse {
            id: attempt.id.clone(),
            quiz_id: attempt.quiz_id.clone(),
            quiz_title: attempt.quiz_title.clone(),
            correct: attempt.correct,
            incorrect: attempt.incorrect(),
            total: attempt.total,
            score: attempt.score,
            band,
            band_label: band.label().to_string(),
            submitted_at: attempt.submitted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuestionReview {
    pub question_id: String,
    pub text: String,
    pub options: Vec<String>,
    pub selected_option_index: Option<i32>,
    pub correct_answer_index: i32,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizAttemptReview {
    pub attempt: QuizAttemptResponse,
    pub questions: Vec<QuestionReview>,
}

impl From<&QuizAttempt> for QuizAttemptReview {
    fn from(attempt: &QuizAttempt) -> Self {
        let questions = attempt
            .questions_snapshot
            .iter()
            .map(|q| {
                let selected = attempt.answers.selected(&q.id);
                QuestionReview {
                    question_id: q.id.clone(),
                    text: q.text.clone(),
                    options: q.options.clone(),
                    selected_option_index: selected,
                    correct_answer_index: q.correct_answer_index,
                    is_correct: q.is_answered_correctly(selected),
                }
            })
            .collect();

        QuizAttemptReview {
            attempt: QuizAttemptResponse::from(attempt),
            questions,
        }
    }
}

#[derive(Debug, Serialize, SimpleObject)]
pub struct DeleteQuizResponse {
    pub quiz_id: String,
    pub deleted_attempts: i32,
    pub message: String,
}
