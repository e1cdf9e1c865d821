//! Error types for loading, validating and training models

use std::path::PathBuf;

use thiserror::Error;

/// Failures around the trained artifact and inference inputs.
///
/// Any of these at startup means the service must not serve predictions.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to access model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed model artifact: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unsupported artifact format v{actual} (expected v{expected})")]
    UnsupportedFormat { expected: u8, actual: u8 },

    #[error("model artifact checksum mismatch: expected {expected}, computed {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("vocabulary layout mismatch: expected {expected:08x}, got {actual:08x}")]
    LayoutMismatch { expected: u32, actual: u32 },

    #[error("feature width mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("corrupt model artifact: {0}")]
    Corrupt(String),
}

/// Failures while preparing a corpus or fitting the pipeline.
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("training corpus is empty")]
    EmptyCorpus,

    #[error("unknown category '{label}' at record {record}")]
    UnknownCategory { label: String, record: usize },

    #[error("need at least 2 categories to train, found {0}")]
    TooFewCategories(usize),

    #[error("category {category} has {count} examples, at least {required} required")]
    InsufficientExamples {
        category: String,
        count: usize,
        required: usize,
    },

    #[error("no terms survived vocabulary selection")]
    EmptyVocabulary,

    #[error("invalid training configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read training corpus: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type ModelResult<T> = Result<T, ModelError>;
pub type TrainingResult<T> = Result<T, TrainingError>;
