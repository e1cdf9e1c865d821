//! Health check handler

use axum::{extract::State, Json};

use crate::models::{HealthResponse, ServiceInfo};
use crate::AppState;

const ENDPOINTS: &[(&str, &str)] = &[
    ("health", "GET /health"),
    ("categories", "GET /categories"),
    ("predict", "POST /predict"),
    ("predict_batch", "POST /predict-batch"),
    ("predict_text", "POST /predict-text"),
    ("detect_anomalies", "POST /detect-anomalies"),
];

/// Service name, version and endpoint map
pub async fn info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "Transaction ML Service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "running".to_string(),
        endpoints: ENDPOINTS
            .iter()
            .map(|(name, route)| (name.to_string(), route.to_string()))
            .collect(),
    })
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, categories) = match &state.categorizer {
        Some(categorizer) => ("healthy", categorizer.categories().len()),
        None => ("unavailable", 0),
    };

    Json(HealthResponse {
        status: status.to_string(),
        models_loaded: state.categorizer.is_some(),
        categories,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
