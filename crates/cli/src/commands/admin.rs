//! Admin account management.
//!
//! # Usage
//!
//! ```bash
//! mp-cli admin create -e admin@megaprime.in -p 'long-random-password'
//!
//! # or keep the password out of shell history
//! MEGAPRIME_ADMIN_PASSWORD=... mp-cli admin create -e admin@megaprime.in
//! ```
//!
//! Registration goes through the same checks as `POST /api/auth/register`:
//! the email must equal `MEGAPRIME_ADMIN_EMAIL` and the account must not
//! exist yet.

use secrecy::{ExposeSecret, SecretString};

use megaprime_server::services::auth::{AuthService, TokenSigner};

use super::{CliError, open_store};

/// Create the admin account.
pub async fn create(email: &str, password: &SecretString) -> Result<(), CliError> {
    let (config, store) = open_store().await?;
    let signer = TokenSigner::new(config.jwt_secret.clone(), config.token_ttl);
    let auth = AuthService::new(store.as_ref(), &signer, &config.admin_email);

    tracing::info!("Creating admin account: {}", email);
    let session = auth.register(email, password.expose_secret()).await?;

    tracing::info!(
        "Admin account created successfully! ID: {}, Email: {}",
        session.admin.id,
        session.admin.email
    );
    Ok(())
}
