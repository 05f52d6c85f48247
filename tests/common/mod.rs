#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use quizify_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, QuizAttempt, QuizQuestion},
        dto::quiz_dto::{GenerateQuizRequest, GeneratedQuestionDto, GeneratedQuizDto},
    },
    repositories::{QuizAttemptRepository, QuizRepository},
    services::{storage_service::StoredDocument, DocumentStore, LocalDocumentStore, QuizGenerator},
};
use secrecy::SecretString;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const JWT_SECRET: &str = "integration_test_secret_that_is_long_enough";

pub fn test_config(max_upload_bytes: usize) -> Config {
    Config {
        app_env: "test".to_string(),
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "quizify-test".to_string(),
        quizzes_collection: "quizzes".to_string(),
        attempts_collection: "quiz_attempts".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 0,
        jwt_secret: SecretString::from(JWT_SECRET.to_string()),
        jwt_expiration_hours: 1,
        generation_service_url: "http://127.0.0.1:9".to_string(),
        generation_api_key: None,
        generation_timeout_secs: 1,
        document_storage_dir: std::env::temp_dir().display().to_string(),
        document_base_url: "http://files.test".to_string(),
        public_base_url: "https://quizify.test".to_string(),
        max_upload_bytes,
    }
}

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: RwLock<Vec<Quiz>>,
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.iter().any(|q| q.id == quiz.id) {
            return Err(AppError::AlreadyExists(quiz.id));
        }
        quizzes.push(quiz.clone());
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.iter().find(|q| q.id == id).cloned())
    }

    async fn list_by_owner(&self, owner_id: &str) -> AppResult<Vec<Quiz>> {
        let mut quizzes: Vec<Quiz> = self
            .quizzes
            .read()
            .await
            .iter()
            .rev()
            .filter(|q| q.owner_id == owner_id)
            .cloned()
            .collect();
        quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quizzes)
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        let slot = quizzes
            .iter_mut()
            .find(|q| q.id == quiz.id)
            .ok_or_else(|| AppError::NotFound(quiz.id.clone()))?;
        *slot = quiz.clone();
        Ok(quiz)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let mut quizzes = self.quizzes.write().await;
        let before = quizzes.len();
        quizzes.retain(|q| q.id != id);
        Ok(quizzes.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryAttemptRepository {
    attempts: RwLock<Vec<QuizAttempt>>,
}

impl InMemoryAttemptRepository {
    pub async fn all(&self) -> Vec<QuizAttempt> {
        self.attempts.read().await.clone()
    }
}

#[async_trait]
impl QuizAttemptRepository for InMemoryAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        self.attempts.write().await.push(attempt.clone());
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>> {
        Ok(self.attempts.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn list_by_owner(&self, owner_id: &str) -> AppResult<Vec<QuizAttempt>> {
        // newest insert first so equal timestamps still come back newest first
        let mut attempts: Vec<QuizAttempt> = self
            .attempts
            .read()
            .await
            .iter()
            .rev()
            .filter(|a| a.owner_id == owner_id)
            .cloned()
            .collect();
        attempts.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(attempts)
    }

    async fn delete_by_owner_and_quiz(&self, owner_id: &str, quiz_id: &str) -> AppResult<u64> {
        let mut attempts = self.attempts.write().await;
        let before = attempts.len();
        attempts.retain(|a| !(a.owner_id == owner_id && a.quiz_id == quiz_id));
        Ok((before - attempts.len()) as u64)
    }
}

/// Answers `count` two-option questions; the correct option of question `n` is `n % 2`.
pub struct StubGenerator;

#[async_trait]
impl QuizGenerator for StubGenerator {
    async fn generate(&self, request: &GenerateQuizRequest) -> AppResult<GeneratedQuizDto> {
        if !request.pdf_data_uri.starts_with("data:application/pdf;base64,") {
            return Err(AppError::GenerationError("unexpected data uri".to_string()));
        }
        let questions = (1..=request.question_count)
            .map(|n| GeneratedQuestionDto {
                id: format!("q{}", n),
                text: format!("Question {}", n),
                options: vec!["even".to_string(), "odd".to_string()],
                correct_answer_index: n % 2,
            })
            .collect();
        Ok(GeneratedQuizDto {
            id: Uuid::new_v4().to_string(),
            title: format!("Quiz from {}", request.file_name),
            description: None,
            question_count: request.question_count,
            questions,
        })
    }
}

pub struct FailingDocumentStore;

#[async_trait]
impl DocumentStore for FailingDocumentStore {
    async fn store(&self, _file_name: &str, _bytes: &[u8]) -> AppResult<StoredDocument> {
        Err(AppError::StorageError("storage offline".to_string()))
    }
}

pub struct Harness {
    pub state: AppState,
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub attempts: Arc<InMemoryAttemptRepository>,
    pub documents_dir: tempfile::TempDir,
}

pub fn harness(max_upload_bytes: usize) -> Harness {
    let quizzes = Arc::new(InMemoryQuizRepository::default());
    let attempts = Arc::new(InMemoryAttemptRepository::default());
    let documents_dir = tempfile::tempdir().unwrap();
    let documents = Arc::new(LocalDocumentStore::new(documents_dir.path(), "http://files.test"));

    let state = AppState::from_parts(
        test_config(max_upload_bytes),
        quizzes.clone(),
        attempts.clone(),
        Arc::new(StubGenerator),
        documents,
    );

    Harness {
        state,
        quizzes,
        attempts,
        documents_dir,
    }
}

/// `total` questions whose correct option is always 0.
pub fn quiz_with_questions(id: &str, owner_id: &str, title: &str, total: usize) -> Quiz {
    let questions = (1..=total)
        .map(|n| QuizQuestion::new(&format!("q{}", n), "?", &["right", "wrong"], 0))
        .collect();
    Quiz::new(id, title, None, questions, owner_id, None)
}
