//! Page content route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use megaprime_core::SectionKey;

use crate::error::{ApiJson, ApiQuery, Result};
use crate::middleware::RequireAdmin;
use crate::models::{ContentDocument, ContentSummary};
use crate::services::content::SeedMode;
use crate::state::AppState;

/// Body of a content update. Missing fields are rejected by validation
/// with a 400.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateContent {
    pub title: String,
    pub content: Value,
}

/// Query parameters for seeding.
#[derive(Debug, Default, Deserialize)]
pub struct SeedParams {
    #[serde(default)]
    pub mode: SeedMode,
}

/// Result of seeding the default content.
#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: &'static str,
    pub written: Vec<SectionKey>,
    pub skipped: Vec<SectionKey>,
}

/// List every section's key and title.
///
/// GET /api/content
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ContentSummary>>> {
    Ok(Json(state.content().list_all().await?))
}

/// Get one section.
///
/// GET /api/content/{section_key}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(section_key): Path<String>,
) -> Result<Json<ContentDocument>> {
    Ok(Json(state.content().get_by_section_key(&section_key).await?))
}

/// Create or replace a section.
///
/// PUT /api/content/{section_key}
#[instrument(skip(state, form), fields(admin_id = %claims.id))]
pub async fn update(
    RequireAdmin(claims): RequireAdmin,
    State(state): State<AppState>,
    Path(section_key): Path<String>,
    ApiJson(form): ApiJson<UpdateContent>,
) -> Result<Json<ContentDocument>> {
    let doc = state
        .content()
        .upsert(&section_key, &form.title, form.content)
        .await?;
    Ok(Json(doc))
}

/// Write the built-in default sections.
///
/// POST /api/content/init[?mode=overwrite|missing-only]
#[instrument(skip(state), fields(admin_id = %claims.id))]
pub async fn init(
    RequireAdmin(claims): RequireAdmin,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SeedParams>,
) -> Result<Json<SeedResponse>> {
    let report = state.content().seed_defaults(params.mode).await?;

    Ok(Json(SeedResponse {
        message: "Initial content created successfully",
        written: report.written,
        skipped: report.skipped,
    }))
}
