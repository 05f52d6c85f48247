//! Persistence of uploaded source documents.

use std::path::PathBuf;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::constants::limits::{DOCUMENT_PREFIX, PDF_CONTENT_TYPE};
use crate::errors::AppResult;
use crate::models::domain::SourceDocument;

static UNSAFE_FILE_NAME_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z0-9._-]+").expect("UNSAFE_FILE_NAME_CHARS is a valid regex pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub url: String,
    pub file_name: String,
    pub sha256: String,
    pub size_bytes: i64,
}

impl From<StoredDocument> for SourceDocument {
    fn from(doc: StoredDocument) -> Self {
        SourceDocument {
            url: doc.url,
            file_name: doc.file_name,
            sha256: doc.sha256,
            size_bytes: doc.size_bytes,
        }
    }
}

/// Replaces anything outside `[A-Za-z0-9._-]` with `_`; never returns an empty name.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned = UNSAFE_FILE_NAME_CHARS.replace_all(base.trim(), "_");
    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        "document.pdf".to_string()
    } else {
        cleaned.to_string()
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

pub fn pdf_data_uri(bytes: &[u8]) -> String {
    format!("data:{};base64,{}", PDF_CONTENT_TYPE, STANDARD.encode(bytes))
}

/// Object key `quizzes_pdfs/<uuid>-<sanitized name>`.
pub fn document_key(file_name: &str) -> String {
    format!(
        "{}/{}-{}",
        DOCUMENT_PREFIX,
        Uuid::new_v4(),
        sanitize_file_name(file_name)
    )
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> AppResult<StoredDocument>;
}

pub struct LocalDocumentStore {
    root: PathBuf,
    base_url: String,
}

impl LocalDocumentStore {
    pub fn new(root: impl Into<PathBuf>, base_url: &str) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> AppResult<StoredDocument> {
        let key = document_key(file_name);
        let path = self.root.join(&key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        log::debug!("Stored {} bytes at {}", bytes.len(), path.display());

        Ok(StoredDocument {
            url: format!("{}/{}", self.base_url, key),
            file_name: file_name.to_string(),
            sha256: sha256_hex(bytes),
            size_bytes: bytes.len() as i64,
        })
    }
}
