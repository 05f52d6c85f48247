#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{AnswerSet, Quiz, QuizQuestion};

    /// Five questions with answer key `[1, 2, 0, 1, 2]`.
    pub fn five_question_quiz(id: &str, owner_id: &str) -> Quiz {
        let questions = [1, 2, 0, 1, 2]
            .iter()
            .enumerate()
            .map(|(i, &correct)| {
                QuizQuestion::new(
                    &format!("q{}", i + 1),
                    &format!("Question {}", i + 1),
                    &["a", "b", "c"],
                    correct,
                )
            })
            .collect();
        Quiz::new(id, "Biology Basics", None, questions, owner_id, None)
    }

    /// Three of five correct against [`five_question_quiz`].
    pub fn three_of_five_answers() -> AnswerSet {
        [("q1", 1), ("q2", 2), ("q3", 1), ("q4", 1), ("q5", 0)]
            .iter()
            .map(|(q, a)| (q.to_string(), *a))
            .collect()
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::test_helpers::*;
    use crate::services::scoring::score_answers;
    use actix_web::http::StatusCode;

    #[test]
    fn test_fixture_quiz_shape() {
        let quiz = five_question_quiz("quiz-1", "owner");
        assert_eq!(quiz.question_count, 5);
        assert!(quiz.questions.iter().all(|q| q.has_valid_answer_key()));
    }

    #[test]
    fn test_fixture_answers_score_sixty() {
        let quiz = five_question_quiz("quiz-1", "owner");
        assert_eq!(score_answers(&quiz.questions, &three_of_five_answers()).score, 60);
    }

    #[test]
    fn test_status_helpers() {
        assert_success_status(StatusCode::CREATED);
        assert_error_status(StatusCode::FORBIDDEN);
    }
}
