//! Contact form submission types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use megaprime_core::ContactId;

/// A stored contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: ContactId,
    pub name: String,
    /// Stored as typed; only checked for non-emptiness.
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A validated submission that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}
