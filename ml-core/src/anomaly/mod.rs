//! Anomaly Module - unusual transaction amounts
//!
//! - `stats.rs`: `GroupStats`, Welford mean/variance with leave-one-out
//! - `scorer.rs`: `AnomalyScorer`, category/global z-scores and reasons
//!
//! Degenerate input (empty batch, single transaction, zero spread) yields
//! no flags rather than an error.

pub mod scorer;
pub mod stats;

pub use scorer::{AnomalyConfig, AnomalyFlag, AnomalyScorer};
pub use stats::GroupStats;
