//! Prediction models

use serde::{Deserialize, Serialize};
use txn_ml_core::{Category, TransactionType};
use validator::{Validate, ValidationError};

use super::{validate_date, MAX_DESCRIPTION_CHARS};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransactionInput {
    #[validate(length(max = 500))]
    pub description: String,

    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,

    #[validate(custom(function = "validate_date"))]
    pub date: String,

    /// Derived from the description when absent
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
}

impl TransactionInput {
    pub fn new(description: impl Into<String>, amount: f64, date: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            amount,
            date: date.into(),
            kind: None,
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.kind
            .unwrap_or_else(|| TransactionType::infer(&self.description))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub category: Category,
    pub confidence: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct BatchPredictRequest {
    #[validate(length(min = 1, max = 1000), nested)]
    pub transactions: Vec<TransactionInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchPredictResponse {
    pub predictions: Vec<PredictionResponse>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TextBatchRequest {
    #[validate(length(min = 1, max = 100), custom(function = "validate_descriptions"))]
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrediction {
    pub category: Category,
    pub confidence: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TextBatchResponse {
    pub predictions: Vec<TextPrediction>,
}

fn validate_descriptions(descriptions: &[String]) -> Result<(), ValidationError> {
    if descriptions
        .iter()
        .any(|d| d.chars().count() as u64 > MAX_DESCRIPTION_CHARS)
    {
        let mut err = ValidationError::new("length");
        err.message = Some(format!("descriptions are limited to {} characters", MAX_DESCRIPTION_CHARS).into());
        return Err(err);
    }
    Ok(())
}
