// regexgrid/src/server/mod.rs
//! HTTP front end.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use log::info;
use tower_http::cors::CorsLayer;

use regexgrid_core::{PatternSynthesizer, ServerConfig};

/// Shared, read-only state for every request.
pub struct AppState {
    pub synthesizer: PatternSynthesizer,
    pub preview_rows: usize,
}

/// Builds the full router with all routes and middleware.
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/transform", post(handlers::transform))
        .route("/api/download", post(handlers::download))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Binds `config.bind` and serves until the process is stopped.
pub async fn serve(synthesizer: PatternSynthesizer, config: &ServerConfig) -> Result<()> {
    let app = build_router(
        AppState {
            synthesizer,
            preview_rows: config.preview_rows,
        },
        config.max_upload_bytes,
    );

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("regexgrid listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}
