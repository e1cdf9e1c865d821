//! Anomaly detection handler

use axum::{extract::State, Json};
use txn_ml_core::AmountRecord;

use crate::extract::ValidatedJson;
use crate::models::{AnomalyRequest, AnomalyResponse};
use crate::{AppResult, AppState};

/// Flag unusual amounts in the submitted batch
pub async fn detect(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AnomalyRequest>,
) -> AppResult<Json<AnomalyResponse>> {
    let batch: Vec<AmountRecord> = req.transactions.iter().map(AmountRecord::from).collect();
    let history: Vec<AmountRecord> = req.history.iter().map(AmountRecord::from).collect();

    let anomalies = state.scorer.score(&batch, &history);
    if !anomalies.is_empty() {
        tracing::info!(
            "Flagged {} of {} transactions ({} history)",
            anomalies.len(),
            batch.len(),
            history.len()
        );
    }

    Ok(Json(AnomalyResponse { anomalies }))
}
