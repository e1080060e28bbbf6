//! API request handlers.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{info, instrument};

use crate::inventory::{list_dependencies, ToolDescriptor};
use crate::settings::{SettingsRecord, SettingsUpdate};

use super::error::{ApiError, ApiResult};
use super::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Current settings, from which the dashboard populates its form.
///
/// Always returns a complete record; a missing or unreadable file shows up
/// as the defaults, never as an error.
#[instrument(skip(state))]
pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsRecord> {
    Json(state.settings.read())
}

/// Response to a successful settings update.
#[derive(Debug, Serialize)]
pub struct UpdateSettingsResponse {
    pub success: bool,
    pub message: String,
}

/// Apply a partial settings update. Fields absent from the request body are
/// left untouched in the stored file.
#[instrument(skip(state, update))]
pub async fn update_settings(
    State(state): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> ApiResult<Json<UpdateSettingsResponse>> {
    state
        .settings
        .write(&update)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    info!(path = %state.settings.path().display(), "Settings updated");
    Ok(Json(UpdateSettingsResponse {
        success: true,
        message: "Settings saved".to_string(),
    }))
}

/// Dependencies of the widget subsystem, as reported by the inventory.
#[derive(Debug, Serialize)]
pub struct DependenciesResponse {
    pub success: bool,
    pub software: Vec<ToolDescriptor>,
    pub timestamp: String,
}

/// List the installed software this subsystem depends on.
///
/// An unavailable inventory degrades to an empty list; the response still
/// reports success.
#[instrument(skip(state))]
pub async fn get_dependencies(State(state): State<AppState>) -> Json<DependenciesResponse> {
    let software = list_dependencies(state.inventory.as_ref(), &state.allowlist).await;

    Json(DependenciesResponse {
        success: true,
        software,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
