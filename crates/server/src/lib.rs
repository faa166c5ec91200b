//! MegaPrime Server - Content API and admin backend for the MegaPrime
//! Residency landing page.
//!
//! # Architecture
//!
//! - Axum web framework serving a JSON API under `/api`
//! - Document store behind repository traits: `PostgreSQL` (sqlx, JSONB
//!   payloads) or in-memory
//! - Single administrator authenticated with Argon2id password hashes and
//!   stateless HS256 bearer tokens
//! - Sentry + tracing for error tracking and structured logs
//!
//! The binary in `main.rs` wires these together; the CLI and integration
//! tests reuse the same pieces through this library.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::{ConfigError, ServerConfig, StoreConfig};
pub use error::AppError;
pub use routes::router;
pub use state::AppState;
