//! Transaction ML Service - entry point
//!
//! Loads the model artifact named by `MODEL_PATH` and serves it. A missing or
//! corrupt artifact is fatal.

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use txn_ml_core::Categorizer;
use txn_ml_service::{create_router, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "txn_ml_service=debug,txn_ml_core=info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        "Transaction ML Service v{} starting ({})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    let categorizer = match Categorizer::load(&config.model_path) {
        Ok(categorizer) => categorizer,
        Err(e) => {
            tracing::error!("Failed to load model from {}: {}", config.model_path, e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Model ready: {} categories",
        categorizer.categories().len()
    );

    // Build application state
    let state = AppState::new(config.clone(), Some(categorizer));

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
