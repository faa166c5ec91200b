//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MEGAPRIME_JWT_SECRET` - Token signing secret (min 32 chars, high entropy)
//! - `MEGAPRIME_ADMIN_EMAIL` - The only address allowed to register as admin
//! - `MEGAPRIME_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`; not needed with the memory store)
//!
//! ## Optional
//! - `MEGAPRIME_STORE` - `postgres` (default) or `memory`
//! - `MEGAPRIME_HOST` - Bind address (default: 127.0.0.1)
//! - `MEGAPRIME_PORT` - Listen port (default: 5000)
//! - `MEGAPRIME_TOKEN_TTL_HOURS` - Admin token lifetime (default: 24)
//! - `MEGAPRIME_CORS_ORIGIN` - Allowed front-end origin (default: any)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use chrono::Duration;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use megaprime_core::Email;

const MIN_JWT_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Which document store backs the server.
#[derive(Clone)]
pub enum StoreConfig {
    /// `PostgreSQL` via sqlx.
    Postgres {
        /// Connection URL (contains password)
        database_url: SecretString,
    },
    /// Process memory; contents are lost on restart.
    Memory,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres { .. } => f
                .debug_struct("Postgres")
                .field("database_url", &"[REDACTED]")
                .finish(),
            Self::Memory => f.write_str("Memory"),
        }
    }
}

/// Server application configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct ServerConfig {
    /// Document store backend
    pub store: StoreConfig,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Admin token signing secret
    pub jwt_secret: SecretString,
    /// The only address allowed to register as admin
    pub admin_email: Email,
    /// Admin token lifetime
    pub token_ttl: Duration,
    /// Allowed CORS origin (any origin when `None`)
    pub cors_origin: Option<HeaderValue>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("store", &self.store)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &"[REDACTED]")
            .field("admin_email", &self.admin_email)
            .field("token_ttl", &self.token_ttl)
            .field("cors_origin", &self.cors_origin)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .finish()
    }
}

impl ServerConfig {
    /// Configuration with defaults for everything except the admin address
    /// and signing secret. Uses the memory store.
    #[must_use]
    pub fn new(admin_email: Email, jwt_secret: SecretString) -> Self {
        Self {
            store: StoreConfig::Memory,
            host: IpAddr::from([127, 0, 0, 1]),
            port: DEFAULT_PORT,
            jwt_secret,
            admin_email,
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
            cors_origin: None,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let store = match env.or_default("MEGAPRIME_STORE", "postgres").as_str() {
            "postgres" => StoreConfig::Postgres {
                database_url: env.database_url("MEGAPRIME_DATABASE_URL")?,
            },
            "memory" => StoreConfig::Memory,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "MEGAPRIME_STORE".to_string(),
                    format!("expected 'postgres' or 'memory', got '{other}'"),
                ));
            }
        };
        let host = env.parsed::<IpAddr>("MEGAPRIME_HOST", "127.0.0.1")?;
        let port = env.parsed::<u16>("MEGAPRIME_PORT", "5000")?;

        let jwt_secret = env.validated_secret("MEGAPRIME_JWT_SECRET")?;
        validate_jwt_secret(&jwt_secret, "MEGAPRIME_JWT_SECRET")?;

        let admin_email = Email::parse(&env.required("MEGAPRIME_ADMIN_EMAIL")?).map_err(|e| {
            ConfigError::InvalidEnvVar("MEGAPRIME_ADMIN_EMAIL".to_string(), e.to_string())
        })?;

        let ttl_hours = env.parsed::<i64>("MEGAPRIME_TOKEN_TTL_HOURS", "24")?;
        if !(1..=24 * 365).contains(&ttl_hours) {
            return Err(ConfigError::InvalidEnvVar(
                "MEGAPRIME_TOKEN_TTL_HOURS".to_string(),
                "must be between 1 and 8760".to_string(),
            ));
        }

        let cors_origin = env
            .optional("MEGAPRIME_CORS_ORIGIN")
            .map(|origin| {
                HeaderValue::from_str(&origin).map_err(|e| {
                    ConfigError::InvalidEnvVar("MEGAPRIME_CORS_ORIGIN".to_string(), e.to_string())
                })
            })
            .transpose()?;

        Ok(Self {
            store,
            host,
            port,
            jwt_secret,
            admin_email,
            token_ttl: Duration::hours(ttl_hours),
            cors_origin,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Load only the database URL, for commands that don't need the full config.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` if neither `MEGAPRIME_DATABASE_URL`
/// nor `DATABASE_URL` is set.
pub fn database_url_from_env() -> Result<SecretString, ConfigError> {
    let _ = dotenvy::dotenv();
    let lookup = |key: &str| std::env::var(key).ok();
    Env(&lookup).database_url("MEGAPRIME_DATABASE_URL")
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with the usual required/optional/default helpers.
struct Env<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Get an optional variable, treating empty values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    /// Get database URL with fallback to generic `DATABASE_URL`.
    fn database_url(&self, primary_key: &str) -> Result<SecretString, ConfigError> {
        self.optional(primary_key)
            .or_else(|| self.optional("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
    }

    /// Load and validate a secret.
    fn validated_secret(&self, key: &str) -> Result<SecretString, ConfigError> {
        let value = self.required(key)?;
        validate_secret_strength(&value, key)?;
        Ok(SecretString::from(value))
    }
}

/// Validate that a signing secret meets minimum length requirements.
fn validate_jwt_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_JWT_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}
