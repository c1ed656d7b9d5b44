// ABOUTME: HTTP request handlers for per-user settings

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use super::auth::CurrentUser;
use super::error::ApiError;
use super::response::ok_or_internal_error;
use crate::AppState;
use taskgen_settings::SettingsUpdateInput;

/// Get the caller's settings, or an empty object when none exist yet.
/// No row is auto-created on read.
pub async fn get_settings(State(state): State<AppState>, user: CurrentUser) -> Response {
    info!("Fetching settings for user: {}", user.id);

    match state.settings.get_settings(&user.id).await {
        Ok(Some(settings)) => (StatusCode::OK, Json(settings)).into_response(),
        Ok(None) => (StatusCode::OK, Json(json!({}))).into_response(),
        Err(err) => {
            error!("Failed to fetch settings: {}", err);
            ApiError::Internal("Failed to fetch settings").into_response()
        }
    }
}

/// Request body for writing settings. The whole record is overwritten;
/// absent fields become NULL in storage.
#[derive(Deserialize)]
pub struct UpdateSettingsRequest {
    #[serde(rename = "darkMode")]
    pub dark_mode: Option<bool>,
    pub language: Option<String>,
    #[serde(rename = "notificationsEnabled")]
    pub notifications_enabled: Option<bool>,
}

/// Upsert the caller's settings row
pub async fn update_settings(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<UpdateSettingsRequest>,
) -> Response {
    info!("Updating settings for user: {}", user.id);

    let input = SettingsUpdateInput {
        dark_mode: request.dark_mode,
        language: request.language,
        notifications_enabled: request.notifications_enabled,
    };

    let result = state
        .settings
        .upsert_settings(&user.id, input)
        .await
        .map(|_| json!({ "success": true }));

    ok_or_internal_error(result, "Failed to update settings")
}
