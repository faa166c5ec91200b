//! Authentication service.
//!
//! Guards the admin surface: one administrator, identified by the configured
//! email address, logs in with a password and receives a stateless bearer
//! token.

mod error;
pub mod token;

pub use error::AuthError;
pub use token::{AdminClaims, TokenError, TokenSigner};

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::instrument;

use megaprime_core::Email;

use crate::db::{AdminRepository, RepositoryError};
use crate::models::AdminAccount;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash verified against when no account matches, so that unknown emails
/// cost one Argon2 verification like known ones.
static DUMMY_HASH: LazyLock<Option<String>> = LazyLock::new(|| {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(b"megaprime-no-such-admin", &salt)
        .ok()
        .map(|hash| hash.to_string())
});

/// A freshly authenticated admin and their bearer token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub admin: AdminAccount,
    pub token: String,
}

/// Authentication service.
///
/// Handles admin registration, login and token verification.
pub struct AuthService<'a, R: AdminRepository + ?Sized> {
    admins: &'a R,
    signer: &'a TokenSigner,
    admin_email: &'a Email,
}

impl<'a, R: AdminRepository + ?Sized> AuthService<'a, R> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(admins: &'a R, signer: &'a TokenSigner, admin_email: &'a Email) -> Self {
        Self {
            admins,
            signer,
            admin_email,
        }
    }

    /// Register the admin account.
    ///
    /// Only the configured admin address may register; that check runs
    /// before anything else.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::RegistrationRestricted` if `email` is not the admin address.
    /// Returns `AuthError::AdminAlreadyExists` if the account is already registered.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    #[instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let email = match Email::parse(email) {
            Ok(email) if email.matches(self.admin_email) => email,
            _ => return Err(AuthError::RegistrationRestricted),
        };

        if self.admins.find_admin_by_email(&email).await?.is_some() {
            return Err(AuthError::AdminAlreadyExists);
        }

        validate_password(password)?;

        let password_hash = hash_password(password.to_owned()).await?;

        let admin = self
            .admins
            .create_admin(&email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::AdminAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(admin_id = %admin.id, "Admin registered");
        self.session(admin)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is malformed or
    /// unknown, or the password is wrong.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let admin = match Email::parse(email) {
            Ok(email) => self.admins.find_admin_by_email(&email).await?,
            Err(_) => None,
        };
        let Some(admin) = admin else {
            verify_dummy_password(password.to_owned()).await;
            return Err(AuthError::InvalidCredentials);
        };

        verify_password(password.to_owned(), admin.password_hash.clone()).await?;

        tracing::info!(admin_id = %admin.id, "Admin logged in");
        self.session(admin)
    }

    /// Verify a bearer token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token is malformed, forged or expired.
    pub fn verify(&self, token: &str) -> Result<AdminClaims, AuthError> {
        self.signer.verify(token).map_err(AuthError::InvalidToken)
    }

    fn session(&self, admin: AdminAccount) -> Result<AuthSession, AuthError> {
        let token = self.signer.issue(admin.id).map_err(AuthError::TokenIssue)?;
        Ok(AuthSession { admin, token })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Validate password requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id on the blocking pool.
async fn hash_password(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHash)
    })
    .await
    .map_err(|_| AuthError::PasswordHash)?
}

/// Verify a password against a hash on the blocking pool.
async fn verify_password(password: String, hash: String) -> Result<(), AuthError> {
    tokio::task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&hash).map_err(|_| AuthError::InvalidCredentials)?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)
    })
    .await
    .map_err(|_| AuthError::PasswordHash)?
}

/// Spend one verification on the dummy hash; the outcome is always a failure.
async fn verify_dummy_password(password: String) {
    let _ = tokio::task::spawn_blocking(move || {
        if let Some(hash) = DUMMY_HASH.as_deref().and_then(|h| PasswordHash::new(h).ok()) {
            let _ = Argon2::default().verify_password(password.as_bytes(), &hash);
        }
    })
    .await;
}
