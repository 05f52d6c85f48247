use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::require_owner,
    constants::limits::{MAX_QUESTION_COUNT, MIN_QUESTION_COUNT, PDF_CONTENT_TYPE},
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, SourceDocument},
        dto::{
            quiz_dto::GenerateQuizRequest,
            request::{QuizUpload, RenameQuizInput},
            response::{DeleteQuizResponse, MyQuizzesResponse, QuizForTaking, QuizSummary},
        },
    },
    repositories::{QuizAttemptRepository, QuizRepository},
    services::{
        generation_service::QuizGenerator,
        storage_service::{pdf_data_uri, DocumentStore},
    },
};

const DEFAULT_FILE_NAME: &str = "document.pdf";

/// An upload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpload {
    pub file_name: String,
    pub question_count: i32,
}

/// Checks run in order: file present, PDF content type, size, question count.
pub fn validate_upload(upload: &QuizUpload, max_upload_bytes: usize) -> AppResult<ValidatedUpload> {
    if upload.bytes.is_empty() {
        return Err(AppError::FileRejected("No file provided".to_string()));
    }

    let content_type = upload
        .content_type
        .as_deref()
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase());
    if content_type.as_deref() != Some(PDF_CONTENT_TYPE) {
        return Err(AppError::FileRejected(
            "Only PDF documents are supported".to_string(),
        ));
    }

    if upload.bytes.len() > max_upload_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "File exceeds the {} limit",
            describe_size(max_upload_bytes)
        )));
    }

    let question_count = upload
        .question_count
        .as_deref()
        .map(str::trim)
        .and_then(|c| c.parse::<i32>().ok())
        .filter(|c| (MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(c))
        .ok_or_else(|| {
            AppError::ValidationError(format!(
                "Question count must be a whole number between {} and {}",
                MIN_QUESTION_COUNT, MAX_QUESTION_COUNT
            ))
        })?;

    let file_name = upload
        .file_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_FILE_NAME)
        .to_string();

    Ok(ValidatedUpload {
        file_name,
        question_count,
    })
}

/// Human-readable size, rounded up so a limit never reads as zero.
pub fn describe_size(bytes: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * 1024;
    if bytes >= MIB {
        format!("{} MB", bytes.div_ceil(MIB))
    } else if bytes >= KIB {
        format!("{} KB", bytes.div_ceil(KIB))
    } else {
        format!("{} bytes", bytes)
    }
}

fn fallback_title(file_name: &str) -> String {
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name)
        .trim();
    if stem.is_empty() {
        "Untitled quiz".to_string()
    } else {
        stem.to_string()
    }
}

pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
    generator: Arc<dyn QuizGenerator>,
    documents: Arc<dyn DocumentStore>,
    public_base_url: String,
    max_upload_bytes: usize,
}

impl QuizService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        attempts: Arc<dyn QuizAttemptRepository>,
        generator: Arc<dyn QuizGenerator>,
        documents: Arc<dyn DocumentStore>,
        public_base_url: &str,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            quizzes,
            attempts,
            generator,
            documents,
            public_base_url: public_base_url.to_string(),
            max_upload_bytes,
        }
    }

    /// Validates the upload, generates a quiz from it and persists the result under `owner_id`.
    pub async fn create_from_upload(&self, owner_id: &str, upload: QuizUpload) -> AppResult<Quiz> {
        if owner_id.trim().is_empty() {
            return Err(AppError::Unauthorized(
                "You must be logged in to create a quiz".to_string(),
            ));
        }

        let validated = validate_upload(&upload, self.max_upload_bytes)?;

        let source_document: Option<SourceDocument> = match self
            .documents
            .store(&validated.file_name, &upload.bytes)
            .await
        {
            Ok(stored) => Some(stored.into()),
            Err(e) => {
                log::warn!(
                    "Could not store '{}' for {}; continuing without a source document: {}",
                    validated.file_name,
                    owner_id,
                    e
                );
                None
            }
        };

        let request = GenerateQuizRequest {
            pdf_data_uri: pdf_data_uri(&upload.bytes),
            question_count: validated.question_count,
            file_name: validated.file_name.clone(),
        };
        let generated = self.generator.generate(&request).await?;
        generated.ensure_usable()?;

        let title = match generated.title.trim() {
            "" => fallback_title(&validated.file_name),
            t => t.to_string(),
        };
        let id = generated.id.clone();
        let description = generated.description.clone();
        let quiz = Quiz::new(
            &id,
            &title,
            description,
            generated.into_questions(),
            owner_id,
            source_document,
        );

        let quiz = self.quizzes.create(quiz).await?;
        log::info!(
            "Created quiz '{}' with {} questions for {}",
            quiz.id,
            quiz.question_count,
            owner_id
        );
        Ok(quiz)
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<Quiz> {
        let quiz = self
            .quizzes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        Ok(quiz)
    }

    /// Public quizzes, or the viewer's own, without the answer key.
    pub async fn get_quiz_for_taking(&self, viewer_id: &str, id: &str) -> AppResult<QuizForTaking> {
        let quiz = self.get_quiz(id).await?;
        if !quiz.is_visible_to(viewer_id) {
            return Err(AppError::Forbidden("This quiz is private".to_string()));
        }
        Ok(QuizForTaking::from(&quiz))
    }

    pub async fn list_owner_quizzes(&self, owner_id: &str) -> AppResult<MyQuizzesResponse> {
        let quizzes = self.quizzes.list_by_owner(owner_id).await?;

        let (pinned, others): (Vec<Quiz>, Vec<Quiz>) = quizzes.into_iter().partition(|q| q.is_pinned);
        let summarize = |list: Vec<Quiz>| -> Vec<QuizSummary> {
            list.iter()
                .map(|q| QuizSummary::from_quiz(q, &self.public_base_url))
                .collect()
        };

        Ok(MyQuizzesResponse {
            pinned: summarize(pinned),
            others: summarize(others),
        })
    }

    async fn owned_quiz(&self, owner_id: &str, id: &str) -> AppResult<Quiz> {
        let quiz = self.get_quiz(id).await?;
        require_owner(owner_id, &quiz.owner_id)?;
        Ok(quiz)
    }

    pub async fn rename_quiz(&self, owner_id: &str, id: &str, input: RenameQuizInput) -> AppResult<QuizSummary> {
        let mut quiz = self.owned_quiz(owner_id, id).await?;

        let input = input.trimmed();
        input.validate()?;
        quiz.title = input.title;
        let quiz = self.quizzes.update(quiz).await?;

        log::info!("Quiz '{}' renamed by {}", quiz.id, owner_id);
        Ok(QuizSummary::from_quiz(&quiz, &self.public_base_url))
    }

    pub async fn set_pinned(&self, owner_id: &str, id: &str, pinned: bool) -> AppResult<QuizSummary> {
        let mut quiz = self.owned_quiz(owner_id, id).await?;
        quiz.is_pinned = pinned;
        let quiz = self.quizzes.update(quiz).await?;

        Ok(QuizSummary::from_quiz(&quiz, &self.public_base_url))
    }

    /// Removes the owner's attempts on the quiz, then the quiz itself.
    pub async fn delete_quiz(&self, owner_id: &str, id: &str) -> AppResult<DeleteQuizResponse> {
        let quiz = self.owned_quiz(owner_id, id).await?;

        let deleted_attempts = self
            .attempts
            .delete_by_owner_and_quiz(owner_id, &quiz.id)
            .await?;

        if !self.quizzes.delete(&quiz.id).await? {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }

        log::info!(
            "Quiz '{}' deleted by {} along with {} attempts",
            quiz.id,
            owner_id,
            deleted_attempts
        );
        Ok(DeleteQuizResponse {
            quiz_id: quiz.id,
            deleted_attempts: deleted_attempts as i32,
            message: format!("Quiz \"{}\" has been deleted", quiz.title),
        })
    }
}
