pub mod config;
pub mod error;
pub mod models;
pub mod routes;

use axum::{extract::OriginalUri, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::ApiError;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    if !config.static_dir.is_dir() {
        tracing::warn!(
            "Static directory {} does not exist, only API routes will respond",
            config.static_dir.display()
        );
    }

    let app = build_router(&config)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr();
    tracing::info!("Serving {} on http://{}", config.static_dir.display(), addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router: API routes under `/api`, static assets everywhere else.
pub fn build_router(config: &Config) -> Router {
    let api = Router::new()
        .route("/time", get(routes::time::now))
        .fallback(api_not_found);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .fallback_service(ServeDir::new(&config.static_dir))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn api_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
