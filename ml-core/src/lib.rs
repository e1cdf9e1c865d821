//! Transaction ML Core
//!
//! Text features, category classifier and amount anomaly scoring shared by
//! the `train` binary and the inference service.

pub mod anomaly;
pub mod category;
pub mod constants;
pub mod error;
pub mod features;
pub mod model;
pub mod training;
pub mod transaction;

pub use anomaly::{AnomalyConfig, AnomalyFlag, AnomalyScorer};
pub use category::Category;
pub use error::{ModelError, TrainingError};
pub use model::{Categorizer, ModelArtifact, Prediction};
pub use training::{Trainer, TrainingConfig};
pub use transaction::{AmountRecord, TrainingExample, TransactionType};
