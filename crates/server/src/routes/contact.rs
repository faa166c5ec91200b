//! Contact form route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ApiJson, Result};
use crate::middleware::RequireAdmin;
use crate::models::ContactSubmission;
use crate::services::contact::ContactForm;
use crate::state::AppState;

/// Contact form data. Missing fields deserialize as empty and are rejected
/// by validation with a 400.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: &'static str,
    pub contact: ContactSubmission,
}

/// Submit the contact form.
///
/// POST /api/contact
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>)> {
    let contact = state
        .contact()
        .submit(ContactForm {
            name: &form.name,
            email: &form.email,
            phone: form.phone.as_deref(),
            message: &form.message,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            message: "Contact form submitted successfully",
            contact,
        }),
    ))
}

/// List all submissions, newest first.
///
/// GET /api/contact
#[instrument(skip_all, fields(admin_id = %claims.id))]
pub async fn list(
    RequireAdmin(claims): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactSubmission>>> {
    Ok(Json(state.contact().list_all().await?))
}
