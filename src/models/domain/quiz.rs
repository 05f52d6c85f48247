use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_question::QuizQuestion;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,                  // Assigned by the generation flow
    pub title: String,               // Renamable by the owner
    pub description: Option<String>, // Set on create
    pub questions: Vec<QuizQuestion>,
    pub question_count: i32,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub is_public: bool,
    #[serde(default)] // older documents carry no pin flag
    pub is_pinned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_document: Option<SourceDocument>,
}

/// Where the uploaded PDF a quiz was generated from ended up.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct SourceDocument {
    pub url: String,
    pub file_name: String,
    pub sha256: String,
    pub size_bytes: i64,
}

impl Quiz {
    pub fn new(
        id: &str,
        title: &str,
        description: Option<String>,
        questions: Vec<QuizQuestion>,
        owner_id: &str,
        source_document: Option<SourceDocument>,
    ) -> Self {
        Quiz {
            id: id.to_string(),
            title: title.to_string(),
            description,
            question_count: questions.len() as i32,
            questions,
            owner_id: owner_id.to_string(),
            created_at: Utc::now(),
            is_public: true,
            is_pinned: false,
            source_document,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }

    pub fn is_visible_to(&self, user_id: &str) -> bool {
        self.is_public || self.is_owned_by(user_id)
    }
}
