// ABOUTME: HTTP request handler for the conversational help assistant

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::auth::CurrentUser;
use super::error::ApiError;
use crate::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

/// Forward the user's message to the text generator and return its reply
pub async fn handle_chat(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(request): Json<ChatRequest>,
) -> Response {
    let Some(message) = request.message.filter(|m| !m.is_empty()) else {
        return ApiError::BadRequest("Message is required").into_response();
    };

    match state.generator.chat(&message).await {
        Ok(reply) => (StatusCode::OK, Json(json!({ "reply": reply }))).into_response(),
        Err(err) => {
            error!("Chat request failed: {}", err);
            ApiError::Internal("Something went wrong while chatting.").into_response()
        }
    }
}
