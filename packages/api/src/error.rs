// ABOUTME: API error type mapped to the uniform failure envelope
// ABOUTME: Every failure surfaces to consumers as {error, details?}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input")]
    Validation(Value),

    #[error("{0}")]
    BadRequest(&'static str),

    #[error("Missing or invalid Authorization header")]
    MissingAuth,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Internal(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid input", "details": details }),
            ),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            ApiError::MissingAuth => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Missing or invalid Authorization header" }),
            ),
            ApiError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, json!({ "error": "Unauthorized" }))
            }
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message }))
            }
        };

        (status, Json(body)).into_response()
    }
}
