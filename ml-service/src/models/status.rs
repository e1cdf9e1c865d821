//! Service status models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use txn_ml_core::Category;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub models_loaded: bool,
    pub categories: usize,
    pub version: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
    pub count: usize,
}

/// Service banner served at `/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub status: String,
    /// Endpoint name -> "METHOD /path"
    pub endpoints: BTreeMap<String, String>,
}
