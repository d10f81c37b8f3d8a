//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for settlement computation and split previews
//! - Request and response types
//! - Mapping of domain errors to HTTP responses

pub mod routes;

use axum::Router;
use settleup_shared::AppConfig;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Maximum accepted request body size (8 MiB).
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded application configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Creates state from a loaded configuration.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
