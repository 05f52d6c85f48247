use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::QuizAttempt,
    repositories::quiz_repository::is_duplicate_key,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizAttemptRepository: Send + Sync {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>>;
    /// Newest first.
    async fn list_by_owner(&self, owner_id: &str) -> AppResult<Vec<QuizAttempt>>;
    /// Returns the number of attempts removed.
    async fn delete_by_owner_and_quiz(&self, owner_id: &str, quiz_id: &str) -> AppResult<u64>;
}

pub struct MongoQuizAttemptRepository {
    collection: Collection<QuizAttempt>,
}

impl MongoQuizAttemptRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_attempts collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let owner_quiz_index = IndexModel::builder()
            .keys(doc! { "owner_id": 1, "quiz_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("owner_quiz".to_string())
                    .build(),
            )
            .build();

        let owner_id_index = IndexModel::builder()
            .keys(doc! { "owner_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("owner_id".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(owner_quiz_index).await?;
        self.collection.create_index(owner_id_index).await?;

        log::info!("Successfully created indexes for quiz_attempts collection");
        Ok(())
    }
}

#[async_trait]
impl QuizAttemptRepository for MongoQuizAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        match self.collection.insert_one(&attempt).await {
            Ok(_) => Ok(attempt),
            Err(e) if is_duplicate_key(&e) => Err(AppError::AlreadyExists(format!(
                "Attempt with id '{}' already exists",
                attempt.id
            ))),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>> {
        let attempt = self
            .collection
            .find_one(doc! { "id": id })
            .await?;
        Ok(attempt)
    }

    async fn list_by_owner(&self, owner_id: &str) -> AppResult<Vec<QuizAttempt>> {
        let mut attempts: Vec<QuizAttempt> = self
            .collection
            .find(doc! { "owner_id": owner_id })
            .await?
            .try_collect()
            .await?;

        attempts.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(attempts)
    }

    async fn delete_by_owner_and_quiz(&self, owner_id: &str, quiz_id: &str) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! {
                "owner_id": owner_id,
                "quiz_id": quiz_id
            })
            .await?;
        Ok(result.deleted_count)
    }
}
