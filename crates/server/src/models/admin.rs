//! Admin account domain type.

use chrono::{DateTime, Utc};

use megaprime_core::{AdminId, Email};

/// The site administrator.
///
/// Implements `Debug` manually to redact the password hash.
#[derive(Clone)]
pub struct AdminAccount {
    /// Unique admin ID.
    pub id: AdminId,
    /// Login email (stored lowercase).
    pub email: Email,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}
