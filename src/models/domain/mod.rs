pub mod quiz;
pub mod quiz_attempt;
pub mod quiz_question;
pub use quiz::{Quiz, SourceDocument};
pub use quiz_attempt::{AnswerSet, QuizAttempt};
pub use quiz_question::QuizQuestion;
