//! CLI command implementations.

pub mod admin;
pub mod content;
pub mod migrate;

use std::sync::Arc;

use thiserror::Error;

use megaprime_server::config::{ConfigError, ServerConfig, StoreConfig};
use megaprime_server::db::{self, DocumentStore, RepositoryError};
use megaprime_server::services::auth::AuthError;
use megaprime_server::services::content::ContentError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// `MEGAPRIME_STORE=memory` would discard every change on exit.
    #[error("CLI commands need MEGAPRIME_STORE=postgres")]
    MemoryStore,

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Admin registration failed.
    #[error("Admin error: {0}")]
    Auth(#[from] AuthError),

    /// Content operation failed.
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
}

/// Load the server configuration and open its `PostgreSQL` store.
async fn open_store() -> Result<(ServerConfig, Arc<dyn DocumentStore>), CliError> {
    let config = ServerConfig::from_env()?;
    if matches!(config.store, StoreConfig::Memory) {
        return Err(CliError::MemoryStore);
    }

    tracing::info!("Connecting to database...");
    let store = db::connect(&config.store).await?;
    Ok((config, store))
}
