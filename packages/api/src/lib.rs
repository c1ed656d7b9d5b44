// ABOUTME: HTTP API layer for TaskGen providing REST endpoints and routing
// ABOUTME: Integration layer that depends on all domain packages

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};

use taskgen_ai::TextGenerator;
use taskgen_auth::TokenVerifier;
use taskgen_categories::CategoryStorage;
use taskgen_settings::SettingsStorage;
use taskgen_tasks::TaskStorage;

pub mod auth;
pub mod categories_handlers;
pub mod chat_handlers;
pub mod error;
pub mod health;
pub mod response;
pub mod settings_handlers;
pub mod tasks_handlers;

/// Request-scoped dependencies shared by every handler: the per-domain
/// storages, the text generator, and the token verifier.
#[derive(Clone)]
pub struct AppState {
    pub tasks: TaskStorage,
    pub categories: CategoryStorage,
    pub settings: SettingsStorage,
    pub generator: Arc<dyn TextGenerator>,
    pub verifier: Arc<dyn TokenVerifier>,
}

/// Creates the tasks API router
pub fn create_tasks_router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks_handlers::list_tasks))
        .route("/", post(tasks_handlers::create_task))
        .route("/generate", post(tasks_handlers::generate_tasks))
        .route("/{id}", patch(tasks_handlers::toggle_task_done))
        .route("/{id}", delete(tasks_handlers::delete_task))
}

/// Creates the categories API router
pub fn create_categories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(categories_handlers::list_categories))
        .route("/", post(categories_handlers::create_category))
        .route("/{id}", put(categories_handlers::update_category))
        .route("/{id}", delete(categories_handlers::delete_category))
}

/// Creates the settings API router
pub fn create_settings_router() -> Router<AppState> {
    Router::new()
        .route("/", get(settings_handlers::get_settings))
        .route("/", post(settings_handlers::update_settings))
}

/// Creates the chat API router
pub fn create_chat_router() -> Router<AppState> {
    Router::new().route("/", post(chat_handlers::handle_chat))
}

/// Assemble the full application router. Every resource route sits behind
/// the bearer-auth middleware; only the health endpoint is open.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/tasks", create_tasks_router())
        .nest("/categories", create_categories_router())
        .nest("/settings", create_settings_router())
        .nest("/api/chat", create_chat_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .merge(protected)
        .route("/health", get(health::health_check))
        .with_state(state)
}
