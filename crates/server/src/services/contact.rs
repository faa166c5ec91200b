//! Contact form intake.
//!
//! Submissions need a name, an email and a message; the email is stored as
//! typed so that no lead is dropped over its format. Submissions are stored
//! append-only and listed newest first. There is no deduplication, rate
//! limiting or notification.

use thiserror::Error;
use tracing::instrument;

use crate::db::{ContactRepository, RepositoryError};
use crate::models::{ContactSubmission, NewContactSubmission};

/// Errors that can occur during contact operations.
#[derive(Debug, Error)]
pub enum ContactError {
    /// A required field is empty after trimming.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Raw contact form fields as submitted.
#[derive(Debug, Clone, Default)]
pub struct ContactForm<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub message: &'a str,
}

/// Contact intake service over any [`ContactRepository`].
pub struct ContactService<'a, R: ContactRepository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: ContactRepository + ?Sized> ContactService<'a, R> {
    /// Create a new contact service.
    #[must_use]
    pub const fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Validate and store a submission.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::MissingField` if name, email or message is
    /// blank. Nothing is stored when validation fails.
    #[instrument(skip_all)]
    pub async fn submit(&self, form: ContactForm<'_>) -> Result<ContactSubmission, ContactError> {
        let name = required("name", form.name)?;
        let email = required("email", form.email)?;
        let message = required("message", form.message)?;
        let phone = form
            .phone
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned);

        let stored = self
            .repo
            .insert_contact(&NewContactSubmission {
                name: name.to_owned(),
                email: email.to_owned(),
                phone,
                message: message.to_owned(),
            })
            .await?;

        tracing::info!(contact_id = %stored.id, "Contact form submitted");
        Ok(stored)
    }

    /// All submissions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::Repository` if the store fails.
    pub async fn list_all(&self) -> Result<Vec<ContactSubmission>, ContactError> {
        Ok(self.repo.list_contacts().await?)
    }
}

fn required<'v>(field: &'static str, value: &'v str) -> Result<&'v str, ContactError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ContactError::MissingField(field));
    }
    Ok(value)
}
