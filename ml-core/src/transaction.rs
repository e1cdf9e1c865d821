//! Transaction records shared by training, inference and anomaly scoring

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Direction of money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Debit,
    Credit,
}

/// Description fragments that mark money coming in.
/// The only place debit/credit is derived from text.
const CREDIT_KEYWORDS: &[&str] = &[
    "salary",
    "payroll",
    "paycheck",
    "direct dep",
    "deposit",
    "refund",
    "reimbursement",
    "cashback",
    "interest",
    "dividend",
    "transfer from",
    "received",
];

impl TransactionType {
    /// Derive the type from a description when the caller did not supply one
    pub fn infer(description: &str) -> Self {
        let lowered = description.to_lowercase();
        if CREDIT_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            TransactionType::Credit
        } else {
            TransactionType::Debit
        }
    }
}

/// One labelled description used for training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub description: String,
    pub category: Category,
}

impl TrainingExample {
    pub fn new(description: impl Into<String>, category: Category) -> Self {
        Self {
            description: description.into(),
            category,
        }
    }
}

/// Amount observation fed to the anomaly scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountRecord {
    pub amount: f64,
    pub category: String,
}

impl AmountRecord {
    pub fn new(amount: f64, category: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_credit() {
        assert_eq!(TransactionType::infer("ACME CORP PAYROLL"), TransactionType::Credit);
        assert_eq!(TransactionType::infer("Amazon refund #123"), TransactionType::Credit);
    }

    #[test]
    fn test_infer_debit_default() {
        assert_eq!(TransactionType::infer("Walmart Grocery Store"), TransactionType::Debit);
        assert_eq!(TransactionType::infer(""), TransactionType::Debit);
    }

    #[test]
    fn test_type_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&TransactionType::Debit).unwrap(), "\"DEBIT\"");
        let t: TransactionType = serde_json::from_str("\"CREDIT\"").unwrap();
        assert_eq!(t, TransactionType::Credit);
    }
}
