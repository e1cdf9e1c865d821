//! Anomaly detection models

use serde::{Deserialize, Serialize};
use txn_ml_core::{AmountRecord, AnomalyFlag};
use validator::{Validate, ValidationError};

use super::validate_date;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AmountInput {
    #[validate(custom(function = "validate_finite"))]
    pub amount: f64,

    pub category: String,

    /// Accepted for reference, not used by the statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_date"))]
    pub date: Option<String>,
}

impl From<&AmountInput> for AmountRecord {
    fn from(input: &AmountInput) -> Self {
        AmountRecord::new(input.amount, input.category.clone())
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AnomalyRequest {
    #[validate(length(max = 1000), nested)]
    pub transactions: Vec<AmountInput>,

    /// Reference transactions that inform the statistics but are never flagged
    #[serde(default)]
    #[validate(length(max = 10000), nested)]
    pub history: Vec<AmountInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnomalyResponse {
    pub anomalies: Vec<AnomalyFlag>,
}

fn validate_finite(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(amount: f64) -> AmountInput {
        AmountInput {
            amount,
            category: "Food".into(),
            date: Some("2024-01-15".into()),
        }
    }

    #[test]
    fn test_amount_must_be_finite() {
        assert!(input(12.5).validate().is_ok());
        assert!(input(-3.0).validate().is_ok());
        assert!(input(f64::NAN).validate().is_err());
        assert!(input(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_history_members_are_validated() {
        let request = AnomalyRequest {
            transactions: vec![input(10.0)],
            history: vec![input(f64::NEG_INFINITY)],
        };
        assert!(request.validate().is_err());
    }
}
