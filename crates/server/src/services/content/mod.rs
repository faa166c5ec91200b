//! Content service.
//!
//! Reads and writes page section documents, and seeds the built-in defaults.

pub mod defaults;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;

use megaprime_core::{SectionBody, SectionBodyError, SectionKey, SectionKeyError};

use crate::db::{ContentRepository, RepositoryError};
use crate::models::{ContentDocument, ContentSummary};

pub use defaults::{DefaultSection, default_sections};

/// Errors that can occur during content operations.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Section key failed validation.
    #[error("invalid section key: {0}")]
    InvalidSectionKey(#[from] SectionKeyError),

    /// Title is empty after trimming.
    #[error("title is required")]
    MissingTitle,

    /// Payload is not a JSON object or array.
    #[error("invalid content: {0}")]
    InvalidBody(#[from] SectionBodyError),

    /// No document under the requested key.
    #[error("content not found")]
    NotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// How `seed_defaults` treats keys that already have a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedMode {
    /// Unconditionally replace every seeded key, clobbering admin edits.
    #[default]
    Overwrite,
    /// Only insert keys that have no document yet.
    MissingOnly,
}

/// Outcome of a seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Keys whose default document was written.
    pub written: Vec<SectionKey>,
    /// Keys left untouched because a document already existed.
    pub skipped: Vec<SectionKey>,
}

/// Content service over any [`ContentRepository`].
pub struct ContentService<'a, R: ContentRepository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: ContentRepository + ?Sized> ContentService<'a, R> {
    /// Create a new content service.
    #[must_use]
    pub const fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Get the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::NotFound` if no document exists. A malformed
    /// key can never have been stored, so it is reported the same way.
    pub async fn get_by_section_key(&self, key: &str) -> Result<ContentDocument, ContentError> {
        let Ok(key) = SectionKey::parse(key) else {
            return Err(ContentError::NotFound);
        };
        self.repo
            .find_content(&key)
            .await?
            .ok_or(ContentError::NotFound)
    }

    /// List every document's key and title.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Repository` if the store fails.
    pub async fn list_all(&self) -> Result<Vec<ContentSummary>, ContentError> {
        Ok(self.repo.list_content().await?)
    }

    /// Create or replace the document under `key`.
    ///
    /// The stored title and payload are replaced wholesale; nothing from the
    /// previous version is merged in.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::InvalidSectionKey`, `ContentError::MissingTitle`
    /// or `ContentError::InvalidBody` if the input fails validation.
    #[instrument(skip(self, content))]
    pub async fn upsert(
        &self,
        key: &str,
        title: &str,
        content: Value,
    ) -> Result<ContentDocument, ContentError> {
        let key = SectionKey::parse(key)?;
        let title = title.trim();
        if title.is_empty() {
            return Err(ContentError::MissingTitle);
        }
        let body = SectionBody::from_json(key.kind(), content)?;
        if !body.is_typed() {
            tracing::debug!(section = %key, "Storing untyped section payload");
        }

        let doc = self.repo.upsert_content(&key, title, &body).await?;
        tracing::info!(section = %key, "Content updated");
        Ok(doc)
    }

    /// Write the built-in default documents.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Repository` if a write fails. Documents written
    /// before the failure stay written.
    #[instrument(skip(self))]
    pub async fn seed_defaults(&self, mode: SeedMode) -> Result<SeedReport, ContentError> {
        let mut report = SeedReport::default();

        for section in default_sections() {
            let Some(key) = section.kind.section_key() else {
                continue;
            };

            let written = match mode {
                SeedMode::Overwrite => {
                    self.repo
                        .upsert_content(&key, section.title, &section.body)
                        .await?;
                    true
                }
                SeedMode::MissingOnly => {
                    self.repo
                        .insert_content_if_absent(&key, section.title, &section.body)
                        .await?
                }
            };

            if written {
                report.written.push(key);
            } else {
                report.skipped.push(key);
            }
        }

        tracing::info!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            "Default content seeded"
        );
        Ok(report)
    }
}
