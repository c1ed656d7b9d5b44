// ABOUTME: Authentication middleware and request-scoped user extraction
// ABOUTME: Exchanges the bearer token for a verified identity before any handler runs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::ApiError;
use crate::AppState;
use taskgen_auth::AuthUser;

/// Verify the bearer token and attach the resulting identity to the
/// request. Requests failing here never reach a resource handler.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let Some(token) = header.and_then(|h| h.strip_prefix("Bearer ")) else {
        return ApiError::MissingAuth.into_response();
    };

    match state.verifier.verify(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => {
            warn!("Authentication failed: {}", err);
            ApiError::Unauthorized.into_response()
        }
    }
}

/// Current authenticated user, threaded into handlers as an explicit
/// parameter.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .map(|user| Self {
                id: user.id.clone(),
            })
            .ok_or(ApiError::Unauthorized)
    }
}
