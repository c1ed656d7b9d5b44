// ABOUTME: HTTP request handlers for category operations

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::auth::CurrentUser;
use super::error::ApiError;
use super::response::{created_or_internal_error, ok_or_internal_error};
use crate::AppState;

/// List all categories owned by the caller
pub async fn list_categories(State(state): State<AppState>, user: CurrentUser) -> Response {
    info!("Listing categories for user: {}", user.id);

    let result = state
        .categories
        .list_categories(&user.id)
        .await
        .map(|categories| json!({ "categories": categories }));

    ok_or_internal_error(result, "Failed to fetch categories")
}

/// Request body for creating or renaming a category
#[derive(Deserialize)]
pub struct CategoryNameRequest {
    pub name: Option<String>,
}

impl CategoryNameRequest {
    fn validate(self) -> Result<String, ApiError> {
        match self.name {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(ApiError::Validation(json!({ "name": "Name required" }))),
        }
    }
}

/// Create a new category
pub async fn create_category(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CategoryNameRequest>,
) -> Response {
    let name = match request.validate() {
        Ok(name) => name,
        Err(err) => return err.into_response(),
    };

    info!("Creating category '{}' for user: {}", name, user.id);

    let result = state
        .categories
        .create_category(&user.id, &name)
        .await
        .map(|category| json!({ "category": category }));

    created_or_internal_error(result, "Failed to create category")
}

/// Rename a category
pub async fn update_category(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<CategoryNameRequest>,
) -> Response {
    let Ok(id) = id.parse::<i64>() else {
        return ApiError::BadRequest("Invalid category ID").into_response();
    };

    let name = match request.validate() {
        Ok(name) => name,
        Err(err) => return err.into_response(),
    };

    info!("Renaming category {} for user: {}", id, user.id);

    let result = state
        .categories
        .update_category(&user.id, id, &name)
        .await
        .map(|category| json!({ "category": category }));

    ok_or_internal_error(result, "Failed to update category")
}

/// Delete a category
pub async fn delete_category(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = id.parse::<i64>() else {
        return ApiError::BadRequest("Invalid category ID").into_response();
    };

    info!("Deleting category {} for user: {}", id, user.id);

    let result = state
        .categories
        .delete_category(&user.id, id)
        .await
        .map(|_| json!({ "message": "Category deleted" }));

    ok_or_internal_error(result, "Failed to delete category")
}
