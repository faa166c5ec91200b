//! Document store for the site backend.
//!
//! # Collections
//!
//! - `content_section` - One document per section key (title + JSONB payload)
//! - `admin_account` - The single administrator login
//! - `contact_submission` - Append-only contact form submissions
//!
//! Each collection is a repository trait. [`DocumentStore`] bundles the three
//! and is implemented by [`PgStore`] (`PostgreSQL`) and [`MemoryStore`]
//! (tests and local demos).
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p megaprime-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use megaprime_core::{Email, SectionBody, SectionKey};

use crate::config::StoreConfig;
use crate::models::{
    AdminAccount, ContactSubmission, ContentDocument, ContentSummary, NewContactSubmission,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Embedded SQL migrations for the `megaprime` schema.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Section documents keyed by [`SectionKey`].
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Get the document stored under `key`, if any.
    async fn find_content(&self, key: &SectionKey)
    -> Result<Option<ContentDocument>, RepositoryError>;

    /// List every document's key and title in insertion order.
    async fn list_content(&self) -> Result<Vec<ContentSummary>, RepositoryError>;

    /// Create or replace the document under `key` as a single atomic write.
    ///
    /// Title and body are replaced wholesale and `last_updated` is refreshed.
    async fn upsert_content(
        &self,
        key: &SectionKey,
        title: &str,
        body: &SectionBody,
    ) -> Result<ContentDocument, RepositoryError>;

    /// Insert the document only if `key` is absent.
    ///
    /// Returns `true` if a new document was written.
    async fn insert_content_if_absent(
        &self,
        key: &SectionKey,
        title: &str,
        body: &SectionBody,
    ) -> Result<bool, RepositoryError>;
}

/// Administrator credentials.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Look up the admin account by email (case-insensitive).
    async fn find_admin_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<AdminAccount>, RepositoryError>;

    /// Persist a new admin account.
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    async fn create_admin(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<AdminAccount, RepositoryError>;
}

/// Append-only contact form submissions.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Store a submission with a server-assigned id and timestamp.
    async fn insert_contact(
        &self,
        submission: &NewContactSubmission,
    ) -> Result<ContactSubmission, RepositoryError>;

    /// List all submissions, newest first (id descending as tie-break).
    async fn list_contacts(&self) -> Result<Vec<ContactSubmission>, RepositoryError>;
}

/// The full document store used by the server.
#[async_trait]
pub trait DocumentStore: ContentRepository + AdminRepository + ContactRepository {
    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Open the store selected by configuration.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the `PostgreSQL` pool cannot connect.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, RepositoryError> {
    match config {
        StoreConfig::Postgres { database_url } => {
            let pool = create_pool(database_url).await?;
            tracing::info!("Database pool created");
            Ok(Arc::new(PgStore::new(pool)))
        }
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
