// ABOUTME: Response helpers shared by the resource handlers
// ABOUTME: Map storage results to success payloads or logged generic 500s

use std::fmt::Display;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::error::ApiError;

/// 200 with the payload, or a logged 500 carrying only `message`. Internal
/// detail never reaches the caller.
pub(crate) fn ok_or_internal_error<T, E>(result: Result<T, E>, message: &'static str) -> Response
where
    T: Serialize,
    E: Display,
{
    respond_or_internal_error(result, message, StatusCode::OK)
}

/// 201 variant of [`ok_or_internal_error`].
pub(crate) fn created_or_internal_error<T, E>(
    result: Result<T, E>,
    message: &'static str,
) -> Response
where
    T: Serialize,
    E: Display,
{
    respond_or_internal_error(result, message, StatusCode::CREATED)
}

fn respond_or_internal_error<T, E>(
    result: Result<T, E>,
    message: &'static str,
    status: StatusCode,
) -> Response
where
    T: Serialize,
    E: Display,
{
    match result {
        Ok(payload) => (status, Json(payload)).into_response(),
        Err(err) => {
            error!("{}: {}", message, err);
            ApiError::Internal(message).into_response()
        }
    }
}
