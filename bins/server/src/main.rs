//! Mixtape API Server
//!
//! Main entry point for the Mixtape backend service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mixtape_api::{AppState, create_router};
use mixtape_core::storage::{StorageConfig, StorageService};
use mixtape_db::connect;
use mixtape_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mixtape=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Create storage service
    let storage_config =
        StorageConfig::try_from(&config.storage).context("Invalid storage configuration")?;
    let storage =
        StorageService::from_config(storage_config).context("Failed to initialize storage")?;
    info!(
        provider = storage.provider_name(),
        bucket = storage.bucket(),
        "Storage configured"
    );

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        storage: Arc::new(storage),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
