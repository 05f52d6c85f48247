//! Cross-attempt statistics for the history view.
//!
//! All functions expect the attempts of a single owner ordered by
//! `submitted_at` descending, which is how the attempt repository returns them.

use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::limits::HISTORY_CHART_POINTS;
use crate::models::domain::QuizAttempt;
use crate::services::scoring::percentage;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, SimpleObject)]
pub struct HistorySummary {
    pub total_quizzes_taken: i32,
    pub average_score: i32,
    pub total_questions_answered: i32,
    pub total_correct_answers: i32,
    pub overall_accuracy: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, SimpleObject)]
pub struct ChartPoint {
    pub label: String,
    pub score: i32,
}

/// One row of the history table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, SimpleObject)]
pub struct HistoryEntry {
    pub attempt_id: String,
    pub quiz_id: String,
    pub quiz_title: String,
    pub submitted_at: DateTime<Utc>,
    pub score: i32,
    pub correct: i32,
    pub total: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, SimpleObject)]
pub struct HistoryReport {
    pub summary: HistorySummary,
    pub chart: Vec<ChartPoint>,
    pub attempts: Vec<HistoryEntry>,
}

pub fn summarize(attempts: &[QuizAttempt]) -> HistorySummary {
    if attempts.is_empty() {
        return HistorySummary::default();
    }

    let count = attempts.len() as i64;
    let score_sum: i64 = attempts.iter().map(|a| a.score as i64).sum();
    let total_questions: i64 = attempts.iter().map(|a| a.total as i64).sum();
    let total_correct: i64 = attempts.iter().map(|a| a.correct as i64).sum();

    HistorySummary {
        total_quizzes_taken: count as i32,
        // mean of percentages, rounded half up
        average_score: ((2 * score_sum + count) / (2 * count)) as i32,
        total_questions_answered: total_questions as i32,
        total_correct_answers: total_correct as i32,
        overall_accuracy: percentage(total_correct, total_questions),
    }
}

fn chart_label(attempt: &QuizAttempt) -> String {
    let title = attempt.quiz_title.trim();
    if title.is_empty() {
        format!("Quiz {}", attempt.submitted_at.format("%b %-d, %Y"))
    } else {
        title.to_string()
    }
}

/// The `limit` most recent attempts, oldest first.
pub fn recent_scores(attempts: &[QuizAttempt], limit: usize) -> Vec<ChartPoint> {
    attempts
        .iter()
        .take(limit)
        .rev()
        .map(|attempt| ChartPoint {
            label: chart_label(attempt),
            score: attempt.score,
        })
        .collect()
}

pub fn build_report(attempts: &[QuizAttempt]) -> HistoryReport {
    HistoryReport {
        summary: summarize(attempts),
        chart: recent_scores(attempts, HISTORY_CHART_POINTS),
        attempts: attempts
            .iter()
            .map(|a| HistoryEntry {
                attempt_id: a.id.clone(),
                quiz_id: a.quiz_id.clone(),
                quiz_title: a.quiz_title.clone(),
                submitted_at: a.submitted_at,
                score: a.score,
                correct: a.correct,
                total: a.total,
            })
            .collect(),
    }
}
