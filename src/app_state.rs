use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoQuizAttemptRepository, MongoQuizRepository, QuizAttemptRepository, QuizRepository,
    },
    services::{
        DocumentStore, HttpQuizGenerator, LocalDocumentStore, QuizAttemptService, QuizGenerator,
        QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub attempt_service: Arc<QuizAttemptService>,
    pub config: Arc<Config>,
    /// `None` when the repositories are not backed by MongoDB.
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db, &config.quizzes_collection));
        quiz_repository.ensure_indexes().await?;

        let attempt_repository = Arc::new(MongoQuizAttemptRepository::new(
            &db,
            &config.attempts_collection,
        ));
        attempt_repository.ensure_indexes().await?;

        let generator = Arc::new(HttpQuizGenerator::new(
            &config.generation_service_url,
            config.generation_api_key.clone(),
            config.generation_timeout_secs,
        )?);
        let documents = Arc::new(LocalDocumentStore::new(
            &config.document_storage_dir,
            &config.document_base_url,
        ));

        let mut state = Self::from_parts(config, quiz_repository, attempt_repository, generator, documents);
        state.db = Some(db);
        Ok(state)
    }

    /// Wires the services over the given collaborators.
    pub fn from_parts(
        config: Config,
        quizzes: Arc<dyn QuizRepository>,
        attempts: Arc<dyn QuizAttemptRepository>,
        generator: Arc<dyn QuizGenerator>,
        documents: Arc<dyn DocumentStore>,
    ) -> Self {
        let quiz_service = Arc::new(QuizService::new(
            quizzes.clone(),
            attempts.clone(),
            generator,
            documents,
            &config.public_base_url,
            config.max_upload_bytes,
        ));
        let attempt_service = Arc::new(QuizAttemptService::new(quizzes, attempts));

        Self {
            quiz_service,
            attempt_service,
            config: Arc::new(config),
            db: None,
        }
    }
}
