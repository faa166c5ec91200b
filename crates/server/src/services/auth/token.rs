//! Stateless admin bearer tokens.
//!
//! Tokens are HS256 JWTs (`header.claims.signature`, base64url without
//! padding) signed with the server secret. Validity is signature plus expiry
//! only; nothing is persisted, so tokens cannot be revoked before they expire.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use megaprime_core::AdminId;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";
const TOKEN_TYPE: &str = "JWT";

/// Errors that can occur when issuing or verifying a token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Not three base64url segments of JSON.
    #[error("malformed token")]
    Malformed,

    /// Header names an algorithm other than HS256.
    #[error("unsupported token algorithm")]
    UnsupportedAlgorithm,

    /// Signature does not match the claims.
    #[error("invalid token signature")]
    InvalidSignature,

    /// `exp` is in the past.
    #[error("token expired")]
    Expired,

    /// The signing key was rejected by HMAC.
    #[error("invalid signing key")]
    InvalidKey,

    /// Claims could not be serialized.
    #[error("token encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Claims carried by an admin token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    /// The authenticated admin.
    pub id: AdminId,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Issues and verifies admin tokens with a fixed lifetime.
///
/// Implements `Debug` manually to redact the secret.
#[derive(Clone)]
pub struct TokenSigner {
    secret: SecretString,
    ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenSigner {
    /// Create a signer for the given secret and token lifetime.
    #[must_use]
    pub const fn new(secret: SecretString, ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    /// Issue a token for `admin` that expires one TTL from now.
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if the claims cannot be encoded or signed.
    pub fn issue(&self, admin: AdminId) -> Result<String, TokenError> {
        self.issue_at(admin, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if the claims cannot be encoded or signed.
    pub fn issue_at(&self, admin: AdminId, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = AdminClaims {
            id: admin,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let header = Header {
            alg: ALGORITHM.to_owned(),
            typ: TOKEN_TYPE.to_owned(),
        };

        let header_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header)?);
        let claims_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
        let signing_input = format!("{header_b64}.{claims_b64}");

        let signature = self.mac(&signing_input)?.finalize().into_bytes();
        let signature_b64 = URL_SAFE_NO_PAD.encode(signature);

        Ok(format!("{signing_input}.{signature_b64}"))
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if the token is malformed, signed with another
    /// key or algorithm, or expired.
    pub fn verify(&self, token: &str) -> Result<AdminClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// See [`TokenSigner::verify`].
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<AdminClaims, TokenError> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };

        let header: Header = decode_segment(header_b64)?;
        if header.alg != ALGORITHM || !header.typ.eq_ignore_ascii_case(TOKEN_TYPE) {
            return Err(TokenError::UnsupportedAlgorithm);
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Malformed)?;
        self.mac(&format!("{header_b64}.{claims_b64}"))?
            .verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let claims: AdminClaims = decode_segment(claims_b64)?;
        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn mac(&self, signing_input: &str) -> Result<HmacSha256, TokenError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|_| TokenError::InvalidKey)?;
        mac.update(signing_input.as_bytes());
        Ok(mac)
    }
}

fn decode_segment<T: serde::de::DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn signer(secret: &str) -> TokenSigner {
        TokenSigner::new(SecretString::from(secret), Duration::hours(24))
    }

    #[test]
    fn test_issued_token_verifies() {
        let signer = signer("k9$Qm2!vX7@pL4#zR8&nT1*wY6^bC3%d");
        let now = Utc::now();
        let token = signer.issue_at(AdminId::new(5), now).unwrap();

        let claims = signer.verify_at(&token, now).unwrap();
        assert_eq!(claims.id, AdminId::new(5));
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let token = signer("first-key-aB3xY9mK2nL5pQ7rT0uW4z")
            .issue(AdminId::new(1))
            .unwrap();
        let err = signer("second-key-aB3xY9mK2nL5pQ7rT0uW4")
            .verify(&token)
            .unwrap_err();
        assert!(matches!(err, TokenError::InvalidSignature));
    }

    #[test]
    fn test_tampered_claims_rejected() {
        let signer = signer("k9$Qm2!vX7@pL4#zR8&nT1*wY6^bC3%d");
        let token = signer.issue(AdminId::new(1)).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged = URL_SAFE_NO_PAD.encode(br#"{"id":2,"iat":0,"exp":9999999999}"#);
        let tampered = format!("{}.{forged}.{}", parts[0], parts[2]);

        let err = signer.verify(&tampered).unwrap_err();
        assert!(matches!(err, TokenError::InvalidSignature));
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = signer("k9$Qm2!vX7@pL4#zR8&nT1*wY6^bC3%d");
        let issued = Utc::now() - Duration::hours(25);
        let token = signer.issue_at(AdminId::new(1), issued).unwrap();

        let err = signer.verify(&token).unwrap_err();
        assert!(matches!(err, TokenError::Expired));
        assert!(signer.verify_at(&token, issued + Duration::hours(23)).is_ok());
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let signer = signer("k9$Qm2!vX7@pL4#zR8&nT1*wY6^bC3%d");
        for token in ["", "abc", "a.b", "a.b.c.d", "!!.??.**"] {
            assert!(
                matches!(signer.verify(token), Err(TokenError::Malformed)),
                "{token:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_unsupported_algorithm_rejected() {
        let signer = signer("k9$Qm2!vX7@pL4#zR8&nT1*wY6^bC3%d");
        let token = signer.issue(AdminId::new(1)).unwrap();
        let rest = token.split_once('.').unwrap().1;
        let none_header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);

        let err = signer.verify(&format!("{none_header}.{rest}")).unwrap_err();
        assert!(matches!(err, TokenError::UnsupportedAlgorithm));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", signer("super-private-signing-key-value!"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-private"));
    }
}
