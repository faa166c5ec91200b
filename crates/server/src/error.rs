//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//! Every error body is JSON: `{"message": "..."}`.

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::auth::AuthError;
use crate::services::contact::ContactError;
use crate::services::content::ContentError;

/// Message returned for every 5xx response.
const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Content operation failed.
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    /// Contact intake failed.
    #[error("Contact error: {0}")]
    Contact(#[from] ContactError),

    /// Request body was not acceptable JSON.
    #[error("Invalid JSON body: {0}")]
    Json(#[from] JsonRejection),

    /// Query string could not be parsed.
    #[error("Invalid query: {0}")]
    Query(#[from] QueryRejection),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials
                | AuthError::MissingToken
                | AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
                AuthError::RegistrationRestricted => StatusCode::FORBIDDEN,
                AuthError::AdminAlreadyExists => StatusCode::CONFLICT,
                AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
                AuthError::TokenIssue(_) | AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Content(err) => match err {
                ContentError::InvalidSectionKey(_)
                | ContentError::MissingTitle
                | ContentError::InvalidBody(_) => StatusCode::BAD_REQUEST,
                ContentError::NotFound => StatusCode::NOT_FOUND,
                ContentError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Contact(err) => match err {
                ContactError::MissingField(_) => StatusCode::BAD_REQUEST,
                ContactError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Json(rejection) => match rejection {
                JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                    StatusCode::BAD_REQUEST
                }
                other => other.status(),
            },
            Self::Query(rejection) => rejection.status(),
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Client-facing message. Never exposes internal details.
    fn message(&self) -> String {
        if self.status().is_server_error() {
            return SERVER_ERROR_MESSAGE.to_string();
        }

        match self {
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::MissingToken => "Not authorized, no token".to_string(),
                AuthError::InvalidToken(_) => "Not authorized, token failed".to_string(),
                AuthError::RegistrationRestricted => {
                    "Registration restricted to authorized admin only.".to_string()
                }
                AuthError::AdminAlreadyExists => "Admin already exists".to_string(),
                AuthError::WeakPassword(msg) => msg.clone(),
                _ => "Authentication error".to_string(),
            },
            Self::Content(err) => match err {
                ContentError::NotFound => "Content not found".to_string(),
                ContentError::MissingTitle => "Title is required".to_string(),
                ContentError::InvalidBody(_) => {
                    "Content must be a JSON object or array".to_string()
                }
                other => other.to_string(),
            },
            Self::Contact(_) => "Please fill in all required fields".to_string(),
            Self::Json(rejection) => rejection.body_text(),
            Self::Query(rejection) => rejection.body_text(),
            Self::NotFound(what) => format!("{what} not found"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(json!({ "message": self.message() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// JSON body extractor whose rejections use the `{"message"}` error format.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose rejections use the `{"message"}` error format.
#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Set the Sentry user context from an admin ID.
///
/// Call this after successful authentication to associate errors with the admin.
pub fn set_sentry_admin(admin_id: &impl ToString) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(admin_id.to_string()),
            ..Default::default()
        }));
    });
}
