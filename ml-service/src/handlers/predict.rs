//! Prediction handlers

use axum::{extract::State, Json};
use txn_ml_core::Prediction;

use crate::extract::ValidatedJson;
use crate::models::{
    BatchPredictRequest, BatchPredictResponse, PredictionResponse, TextBatchRequest, TextBatchResponse,
    TextPrediction, TransactionInput,
};
use crate::{AppResult, AppState};

/// Categorize one transaction
pub async fn predict(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<TransactionInput>,
) -> AppResult<Json<PredictionResponse>> {
    let categorizer = state.categorizer()?;
    let prediction = categorizer.predict(&req.description);
    log_low_confidence(&state, &req.description, &prediction);

    Ok(Json(PredictionResponse {
        category: prediction.category,
        confidence: prediction.confidence,
        kind: req.transaction_type(),
    }))
}

/// Categorize a batch in one pass; output order matches input
pub async fn predict_batch(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<BatchPredictRequest>,
) -> AppResult<Json<BatchPredictResponse>> {
    let categorizer = state.categorizer()?;

    let descriptions: Vec<&str> = req.transactions.iter().map(|t| t.description.as_str()).collect();
    let predictions = categorizer.predict_batch(&descriptions);

    let predictions = req
        .transactions
        .iter()
        .zip(predictions)
        .map(|(txn, prediction)| {
            log_low_confidence(&state, &txn.description, &prediction);
            PredictionResponse {
                category: prediction.category,
                confidence: prediction.confidence,
                kind: txn.transaction_type(),
            }
        })
        .collect();

    Ok(Json(BatchPredictResponse { predictions }))
}

/// Categorize bare descriptions
pub async fn predict_text(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<TextBatchRequest>,
) -> AppResult<Json<TextBatchResponse>> {
    let categorizer = state.categorizer()?;

    let predictions = categorizer
        .predict_batch(req.descriptions.as_slice())
        .into_iter()
        .zip(&req.descriptions)
        .map(|(prediction, description)| {
            log_low_confidence(&state, description, &prediction);
            TextPrediction {
                category: prediction.category,
                confidence: prediction.confidence,
            }
        })
        .collect();

    Ok(Json(TextBatchResponse { predictions }))
}

fn log_low_confidence(state: &AppState, description: &str, prediction: &Prediction) {
    if !prediction.is_confident(state.config.low_confidence_threshold) {
        tracing::warn!(
            "Low confidence prediction: '{}' -> {} ({:.3})",
            description,
            prediction.category,
            prediction.confidence
        );
    }
}
