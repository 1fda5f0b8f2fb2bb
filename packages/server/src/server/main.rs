// Main entry point for the ERP AI try server

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use server_core::domains::assistant::DatasetProvider;
use server_core::domains::auth::JwtService;
use server_core::domains::quota::{GuestQuota, InMemoryQuotaStore};
use server_core::server::{build_app, AppState};
use server_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ERP AI try server");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Pick the dataset provider
    let dataset = match &config.dataset_path {
        Some(path) => {
            tracing::info!(path = %path, "Using file-backed dataset");
            DatasetProvider::File(PathBuf::from(path))
        }
        None => DatasetProvider::Demo,
    };

    // Build application
    let state = AppState {
        dataset: Arc::new(dataset),
        quota: Arc::new(GuestQuota::new(Arc::new(InMemoryQuotaStore::new()))),
        jwt_service: Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_issuer.clone(),
        )),
    };
    let app = build_app(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
