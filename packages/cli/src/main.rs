use axum::http::Method;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;
use taskgen_ai::GeminiClient;
use taskgen_api::AppState;
use taskgen_auth::JwtVerifier;
use taskgen_categories::CategoryStorage;
use taskgen_settings::SettingsStorage;
use taskgen_tasks::TaskStorage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    println!("🚀 Starting TaskGen server...");
    println!("📡 Server will run on http://localhost:{}", config.port);
    println!("🔗 CORS origin: {}", config.cors_origin);

    let pool = taskgen_storage::init_pool(&config.database_url).await?;

    let state = AppState {
        tasks: TaskStorage::new(pool.clone()),
        categories: CategoryStorage::new(pool.clone()),
        settings: SettingsStorage::new(pool),
        generator: Arc::new(GeminiClient::with_model(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
        )),
        verifier: Arc::new(JwtVerifier::new(
            &config.auth_secret_key,
            &config.auth_audience,
        )),
    };

    // Create CORS layer
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<axum::http::HeaderValue>()?)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any);

    // Create the router with CORS
    let app = taskgen_api::create_router(state).layer(cors);

    // Create socket address
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));

    println!("✅ Server listening on {}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
