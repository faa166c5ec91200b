//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! mp-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `MEGAPRIME_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Migrations live in `crates/server/migrations/` and are embedded into the
//! binary at build time.

use megaprime_server::config::database_url_from_env;
use megaprime_server::db;

use super::CliError;

/// Run all pending migrations.
pub async fn run() -> Result<(), CliError> {
    let database_url = database_url_from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
