//! Model Artifact - the persisted output of training
//!
//! On disk the artifact is wrapped in an envelope:
//!
//! ```json
//! { "checksum": "<sha256 hex of model>", "model": { ... } }
//! ```
//!
//! The checksum covers the exact `model` bytes as written, so any edit or
//! truncation is caught before the model is deserialized.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::classifier::LinearClassifier;
use crate::category::Category;
use crate::constants::ARTIFACT_FORMAT_VERSION;
use crate::error::{ModelError, ModelResult};
use crate::features::{validate_layout, TfidfVectorizer};

/// What happened during training, kept for operators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Examples the final model was fitted on
    pub train_samples: usize,
    /// Held-out examples used for evaluation (0 when no split was made)
    pub test_samples: usize,
    /// Most gradient steps taken by any per-category model
    pub iterations: usize,
    /// Every per-category model reached the gradient tolerance
    pub converged: bool,
    /// Mean regularized log-loss across per-category models
    pub final_loss: f64,
    pub holdout_accuracy: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u8,
    pub model_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub vocabulary_hash: u32,
    pub vectorizer: TfidfVectorizer,
    pub classifier: LinearClassifier,
    pub training: TrainingSummary,
}

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    checksum: String,
    model: &'a RawValue,
}

#[derive(Deserialize)]
struct EnvelopeIn<'a> {
    checksum: String,
    #[serde(borrow)]
    model: &'a RawValue,
}

impl ModelArtifact {
    /// Bundle a fitted vectorizer and classifier
    pub fn new(
        vectorizer: TfidfVectorizer,
        classifier: LinearClassifier,
        training: TrainingSummary,
    ) -> ModelResult<Self> {
        let artifact = Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            model_id: Uuid::new_v4(),
            created_at: Utc::now(),
            vocabulary_hash: vectorizer.layout_hash(),
            vectorizer,
            classifier,
            training,
        };
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn categories(&self) -> &[Category] {
        self.classifier.labels()
    }

    /// Cross-check the vectorizer, classifier and recorded hash
    pub fn validate(&self) -> ModelResult<()> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ModelError::UnsupportedFormat {
                expected: ARTIFACT_FORMAT_VERSION,
                actual: self.format_version,
            });
        }

        validate_layout(self.vocabulary_hash, self.vectorizer.layout_hash())?;
        validate_layout(self.vocabulary_hash, self.classifier.layout_hash())?;

        if self.classifier.n_features() != self.vectorizer.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.vectorizer.len(),
                actual: self.classifier.n_features(),
            });
        }

        Ok(())
    }

    /// Write the artifact with its checksum envelope
    pub fn save(&self, path: &Path) -> ModelResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let body = serde_json::to_string(self)?;
        let checksum = sha256_hex(body.as_bytes());
        let model = RawValue::from_string(body)?;
        let envelope = EnvelopeOut {
            checksum,
            model: &model,
        };

        fs::write(path, serde_json::to_vec(&envelope)?)?;
        Ok(())
    }

    /// Read, verify and validate an artifact
    pub fn load(path: &Path) -> ModelResult<Self> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }

        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> ModelResult<Self> {
        let envelope: EnvelopeIn<'_> = serde_json::from_str(data)?;

        let actual = sha256_hex(envelope.model.get().as_bytes());
        if !actual.eq_ignore_ascii_case(&envelope.checksum) {
            return Err(ModelError::ChecksumMismatch {
                expected: envelope.checksum,
                actual,
            });
        }

        let artifact: ModelArtifact = serde_json::from_str(envelope.model.get())?;
        artifact.validate()?;
        Ok(artifact)
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
