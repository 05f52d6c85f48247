pub mod generation_service;
pub mod history;
pub mod quiz_attempt_service;
pub mod quiz_service;
pub mod scoring;
pub mod storage_service;

pub use generation_service::{HttpQuizGenerator, QuizGenerator};
pub use quiz_attempt_service::QuizAttemptService;
pub use quiz_service::QuizService;
pub use storage_service::{DocumentStore, LocalDocumentStore};
