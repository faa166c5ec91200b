//! Bearer token extractor for admin-only routes.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};

use crate::error::{AppError, set_sentry_admin};
use crate::services::auth::{AdminClaims, AuthError};
use crate::state::AppState;

/// Extractor that requires a valid admin bearer token.
///
/// Rejects with 401 when the `Authorization` header is missing, uses a
/// scheme other than `Bearer`, or carries a token that fails verification.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAdmin(claims): RequireAdmin) -> String {
///     format!("Hello, admin {}!", claims.id)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin(pub AdminClaims);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AuthError::MissingToken)?;
        let claims = state.auth().verify(token)?;

        set_sentry_admin(&claims.id);
        tracing::Span::current().record("admin_id", tracing::field::display(claims.id));

        Ok(Self(claims))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("bearer  abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("abc.def.ghi")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
