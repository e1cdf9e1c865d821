//! Central Configuration Constants
//!
//! Single source of truth for pipeline defaults.
//! Training, the trainer CLI and the service all read from here.

/// Default location of the trained model artifact
pub const DEFAULT_MODEL_PATH: &str = "./model.json";

/// Default location of the labelled training corpus
pub const DEFAULT_TRAIN_DATA_PATH: &str = "./data/transactions_train.csv";

/// Artifact on-disk format version
/// MUST be incremented when the artifact layout changes
pub const ARTIFACT_FORMAT_VERSION: u8 = 1;

// ============================================
// Feature extraction
// ============================================

/// Maximum vocabulary size (top-N terms)
pub const DEFAULT_MAX_FEATURES: usize = 500;

/// Minimum number of documents a term must appear in
pub const DEFAULT_MIN_DF: usize = 1;

/// Terms appearing in more than this fraction of documents are dropped
pub const DEFAULT_MAX_DF: f64 = 0.95;

/// Longest n-gram extracted (1 = unigrams, 2 = unigrams + bigrams)
pub const DEFAULT_NGRAM_MAX: usize = 2;

/// Minimum token length in characters
pub const MIN_TOKEN_LEN: usize = 2;

// ============================================
// Classifier training
// ============================================

/// Maximum gradient descent iterations per binary model
pub const DEFAULT_MAX_ITER: usize = 1000;

/// Convergence tolerance on the largest gradient component
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// L2 penalty on the sample-weighted mean log-loss
pub const DEFAULT_L2_PENALTY: f64 = 1e-3;

/// Fraction of the corpus held out for evaluation
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Seed for the stratified split
pub const DEFAULT_RANDOM_SEED: u64 = 42;

/// Minimum labelled examples per category
pub const DEFAULT_MIN_EXAMPLES_PER_CATEGORY: usize = 3;

// ============================================
// Inference
// ============================================

/// Predictions below this confidence are logged for review
pub const DEFAULT_LOW_CONFIDENCE_THRESHOLD: f64 = 0.5;

// ============================================
// Anomaly scoring
// ============================================

/// |z| above this is flagged
pub const DEFAULT_Z_THRESHOLD: f64 = 2.5;

/// Minimum members (including the scored one) for a comparison group
pub const DEFAULT_MIN_GROUP_SIZE: usize = 3;

/// |z| / scale, clipped to 1, is the reported score
pub const DEFAULT_SCORE_SCALE: f64 = 5.0;

/// Below this a standard deviation is treated as zero
pub const VARIANCE_EPSILON: f64 = 1e-9;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model artifact path from environment or use default
pub fn get_model_path() -> String {
    std::env::var("MODEL_PATH")
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Get training corpus path from environment or use default
pub fn get_train_data_path() -> String {
    std::env::var("TRAIN_DATA_PATH")
        .unwrap_or_else(|_| DEFAULT_TRAIN_DATA_PATH.to_string())
}
