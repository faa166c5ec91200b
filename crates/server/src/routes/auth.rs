//! Admin authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use megaprime_core::AdminId;

use crate::error::{ApiJson, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Login and registration form. Missing fields deserialize as empty so the
/// service decides the outcome (403 for a foreign email, 401 on login).
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Response carrying a freshly issued token.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub message: &'static str,
}

/// Response for a successful token check.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub message: &'static str,
    pub admin_id: AdminId,
}

/// Register the admin account.
///
/// POST /api/auth/register
#[instrument(skip_all, fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<Credentials>,
) -> Result<(StatusCode, Json<TokenResponse>)> {
    let session = state.auth().register(&form.email, &form.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            token: session.token,
            message: "Admin registered successfully",
        }),
    ))
}

/// Log in as the admin.
///
/// POST /api/auth/login
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<Credentials>,
) -> Result<Json<TokenResponse>> {
    let session = state.auth().login(&form.email, &form.password).await?;

    Ok(Json(TokenResponse {
        token: session.token,
        message: "Login successful",
    }))
}

/// Check that the caller's token is still valid.
///
/// GET /api/auth/verify
pub async fn verify(RequireAdmin(claims): RequireAdmin) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        message: "Token is valid",
        admin_id: claims.id,
    })
}
