//! Categorizer - loaded model ready for inference
//!
//! Built once from a validated artifact and then only read, so it can be
//! shared behind an `Arc` by any number of request handlers.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::artifact::{ModelArtifact, TrainingSummary};
use super::classifier::Prediction;
use crate::category::Category;
use crate::error::ModelResult;

/// Operator-facing description of the loaded model
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    pub model_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub vocabulary_size: usize,
    pub vocabulary_hash: u32,
    pub categories: Vec<Category>,
    pub training: TrainingSummary,
}

#[derive(Debug, Clone)]
pub struct Categorizer {
    artifact: ModelArtifact,
}

impl Categorizer {
    pub fn new(artifact: ModelArtifact) -> ModelResult<Self> {
        artifact.validate()?;
        Ok(Self { artifact })
    }

    pub fn load(path: impl AsRef<Path>) -> ModelResult<Self> {
        let path = path.as_ref();
        let artifact = ModelArtifact::load(path)?;

        log::info!(
            "Loaded model {} from {} ({} terms, {} categories)",
            artifact.model_id,
            path.display(),
            artifact.vectorizer.len(),
            artifact.categories().len()
        );

        Self::new(artifact)
    }

    pub fn predict(&self, description: &str) -> Prediction {
        let mut predictions = self.predict_batch(&[description]);
        // one row in, one prediction out
        predictions.swap_remove(0)
    }

    /// Vectorizes and scores the whole batch in one pass; output order matches input
    pub fn predict_batch<S: AsRef<str>>(&self, descriptions: &[S]) -> Vec<Prediction> {
        if descriptions.is_empty() {
            return Vec::new();
        }
        let features = self.artifact.vectorizer.transform_batch(descriptions);
        self.artifact.classifier.predict_rows(&features.values)
    }

    pub fn categories(&self) -> &[Category] {
        self.artifact.categories()
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    pub fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            model_id: self.artifact.model_id,
            created_at: self.artifact.created_at,
            vocabulary_size: self.artifact.vectorizer.len(),
            vocabulary_hash: self.artifact.vocabulary_hash,
            categories: self.categories().to_vec(),
            training: self.artifact.training.clone(),
        }
    }
}
