// ABOUTME: HTTP request handlers for task operations
// ABOUTME: Validated CRUD plus AI-backed generation from a topic

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{error, info};

use super::auth::CurrentUser;
use super::error::ApiError;
use super::response::{created_or_internal_error, ok_or_internal_error};
use crate::AppState;
use taskgen_tasks::{TaskCreateInput, TaskPriority};

/// List all tasks owned by the caller
pub async fn list_tasks(State(state): State<AppState>, user: CurrentUser) -> Response {
    info!("Listing tasks for user: {}", user.id);

    let result = state
        .tasks
        .list_tasks(&user.id)
        .await
        .map(|tasks| json!({ "success": true, "tasks": tasks }));

    ok_or_internal_error(result, "Failed to fetch tasks")
}

/// Request body for creating a task
#[derive(Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    #[serde(rename = "categoryIdInt")]
    pub category_id_int: Option<i64>,
}

impl CreateTaskRequest {
    fn validate(self) -> Result<TaskCreateInput, ApiError> {
        let mut details = Map::new();

        let title = self.title.unwrap_or_default();
        if title.is_empty() {
            details.insert("title".to_string(), json!("Title is required"));
        }

        let priority = match self.priority.as_deref() {
            Some(raw) => raw.parse::<TaskPriority>().unwrap_or_else(|_| {
                details.insert(
                    "priority".to_string(),
                    json!("Priority must be one of high, medium, low"),
                );
                TaskPriority::Medium
            }),
            None => TaskPriority::Medium,
        };

        if let Some(id) = self.category_id_int {
            if id <= 0 {
                details.insert(
                    "categoryIdInt".to_string(),
                    json!("categoryIdInt must be a positive integer"),
                );
            }
        }

        if !details.is_empty() {
            return Err(ApiError::Validation(Value::Object(details)));
        }

        Ok(TaskCreateInput {
            title,
            description: self.description.unwrap_or_default(),
            category: self.category,
            priority,
            category_id_int: self.category_id_int,
        })
    }
}

/// Create a new task
pub async fn create_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateTaskRequest>,
) -> Response {
    let input = match request.validate() {
        Ok(input) => input,
        Err(err) => return err.into_response(),
    };

    info!("Creating task '{}' for user: {}", input.title, user.id);

    let result = state
        .tasks
        .create_task(&user.id, input)
        .await
        .map(|task| json!({ "success": true, "task": task }));

    created_or_internal_error(result, "Failed to create task")
}

/// Request body for toggling completion. Either key is accepted; `done`
/// wins when both are present.
#[derive(Deserialize)]
pub struct UpdateDoneRequest {
    pub done: Option<bool>,
    pub completed: Option<bool>,
}

/// Set both completion flags on a task
pub async fn toggle_task_done(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateDoneRequest>,
) -> Response {
    let Ok(id) = id.parse::<i64>() else {
        return ApiError::BadRequest("Invalid task ID").into_response();
    };

    let Some(done) = request.done.or(request.completed) else {
        return ApiError::Validation(json!({
            "done": "A done or completed boolean is required"
        }))
        .into_response();
    };

    info!("Setting task {} done={} for user: {}", id, done, user.id);

    let result = state
        .tasks
        .set_done(&user.id, id, done)
        .await
        .map(|task| json!({ "success": true, "task": task }));

    ok_or_internal_error(result, "Failed to update task")
}

/// Delete a task
pub async fn delete_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = id.parse::<i64>() else {
        return ApiError::BadRequest("Invalid task ID").into_response();
    };

    info!("Deleting task {} for user: {}", id, user.id);

    let result = state.tasks.delete_task(&user.id, id).await.map(|_| {
        json!({ "success": true, "message": "Task deleted successfully" })
    });

    ok_or_internal_error(result, "Failed to delete task")
}

/// Request body for generating tasks from a topic
#[derive(Deserialize)]
pub struct GenerateTasksRequest {
    pub topic: Option<String>,
    pub priority: Option<String>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<i64>,
}

struct ValidatedGenerateRequest {
    topic: String,
    priority: Option<TaskPriority>,
    category_id: i64,
}

impl GenerateTasksRequest {
    fn validate(self) -> Result<ValidatedGenerateRequest, ApiError> {
        let mut details = Map::new();

        let topic = self.topic.unwrap_or_default();
        if topic.chars().count() < 2 {
            details.insert(
                "topic".to_string(),
                json!("Topic must be at least 2 characters"),
            );
        }

        let priority = match self.priority.as_deref() {
            Some(raw) => raw.parse::<TaskPriority>().map(Some).unwrap_or_else(|_| {
                details.insert(
                    "priority".to_string(),
                    json!("Priority must be one of high, medium, low"),
                );
                None
            }),
            None => None,
        };

        if self.category_id.is_none() {
            details.insert("categoryId".to_string(), json!("categoryId is required"));
        }

        if !details.is_empty() {
            return Err(ApiError::Validation(Value::Object(details)));
        }

        Ok(ValidatedGenerateRequest {
            topic,
            priority,
            category_id: self.category_id.unwrap_or_default(),
        })
    }
}

/// Generate up to five tasks for a topic and insert them as one batch
pub async fn generate_tasks(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<GenerateTasksRequest>,
) -> Response {
    let request = match request.validate() {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    info!(
        "Generating tasks for topic '{}' for user: {}",
        request.topic, user.id
    );

    let titles = match state.generator.generate_tasks(&request.topic).await {
        Ok(titles) => titles,
        Err(err) => {
            error!("Task generation failed: {}", err);
            return ApiError::Internal("AI Task generation failed").into_response();
        }
    };

    let inputs = titles
        .into_iter()
        .map(|title| TaskCreateInput {
            title,
            description: format!("Generated from topic: {}", request.topic),
            category: None,
            // Caller-picked level, or an independent random one per task.
            priority: request.priority.unwrap_or_else(TaskPriority::random),
            category_id_int: Some(request.category_id),
        })
        .collect();

    let result = state
        .tasks
        .create_tasks_batch(&user.id, inputs)
        .await
        .map(|tasks| json!({ "success": true, "tasks": tasks }));

    created_or_internal_error(result, "Failed to create generated tasks")
}
