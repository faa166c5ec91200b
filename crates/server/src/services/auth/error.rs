//! Authentication error types.

use thiserror::Error;

use super::token::TokenError;
use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid credentials (wrong password or unknown email).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration attempted with an address other than the configured admin.
    #[error("registration is restricted to the site administrator")]
    RegistrationRestricted,

    /// The admin account already exists.
    #[error("admin already exists")]
    AdminAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// No bearer token on a protected request.
    #[error("missing bearer token")]
    MissingToken,

    /// Bearer token failed verification.
    #[error("invalid token: {0}")]
    InvalidToken(#[source] TokenError),

    /// Token could not be issued.
    #[error("token issue failed: {0}")]
    TokenIssue(#[source] TokenError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
