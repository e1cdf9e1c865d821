//! Model Module - trained artifact and inference
//!
//! # Architecture
//! - `classifier.rs`: one-vs-rest logistic scoring, `Prediction`
//! - `artifact.rs`: checksummed on-disk bundle of vectorizer + classifier
//! - `inference.rs`: `Categorizer`, the read-only object handlers share
//!
//! # Failure Strategy
//! A missing, tampered or misaligned artifact never produces a `Categorizer`.

pub mod artifact;
pub mod classifier;
pub mod inference;

pub use artifact::{ModelArtifact, TrainingSummary};
pub use classifier::{CategoryProbability, ClassifierParts, LinearClassifier, Prediction};
pub use inference::{Categorizer, ModelMetadata};
