//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes
//! - Application state
//! - Router assembly with tracing and CORS layers

pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use mixtape_core::storage::{StorageProvider, StorageService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Storage service for audio files and cover art.
    pub storage: Arc<StorageService>,
}

/// Creates the main application router.
///
/// With the local filesystem storage provider, the storage root is also
/// served under `/files` so recorded object URLs resolve in development.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new().nest("/api/v1", routes::api_routes());

    if let StorageProvider::LocalFs { root } = &state.storage.config().provider {
        router = router.nest_service("/files", ServeDir::new(root));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
