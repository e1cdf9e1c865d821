//! Transaction ML Service
//!
//! HTTP front end over the categorization model and anomaly scorer.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     TXN ML SERVICE                       │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌──────────────┐   ┌────────────────┐  │
//! │  │  Router    │──▶│ Categorizer  │   │ AnomalyScorer  │  │
//! │  │  (Axum)    │   │ (Arc, r/o)   │   │ (stateless)    │  │
//! │  └────────────┘   └──────┬───────┘   └────────────────┘  │
//! │                          ▼                               │
//! │                   ┌─────────────┐                        │
//! │                   │ model.json  │                        │
//! │                   └─────────────┘                        │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use txn_ml_core::{AnomalyScorer, Categorizer};

pub use config::Config;
pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// `None` until a model is loaded
    pub categorizer: Option<Arc<Categorizer>>,
    pub scorer: AnomalyScorer,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, categorizer: Option<Categorizer>) -> Self {
        Self {
            categorizer: categorizer.map(Arc::new),
            scorer: AnomalyScorer::new(config.anomaly.clone()),
            config,
        }
    }

    /// Loaded model, or 503
    pub fn categorizer(&self) -> AppResult<&Categorizer> {
        self.categorizer.as_deref().ok_or(AppError::ModelNotLoaded)
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::info))
        .route("/health", get(handlers::health::check))
        .route("/categories", get(handlers::categories::list))
        .route("/predict", post(handlers::predict::predict))
        .route("/predict-batch", post(handlers::predict::predict_batch))
        .route("/predict-text", post(handlers::predict::predict_text))
        .route("/detect-anomalies", post(handlers::anomalies::detect))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
