//! Configuration module

use std::env;
use std::str::FromStr;

use txn_ml_core::constants::{self, DEFAULT_LOW_CONFIDENCE_THRESHOLD};
use txn_ml_core::AnomalyConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Trained model artifact
    pub model_path: String,

    /// Environment (development, production)
    pub environment: String,

    /// Emit JSON log lines instead of human-readable ones
    pub json_logs: bool,

    /// Predictions below this confidence are logged at WARN
    pub low_confidence_threshold: f64,

    /// Anomaly scorer settings
    pub anomaly: AnomalyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8001,
            model_path: constants::DEFAULT_MODEL_PATH.to_string(),
            environment: "development".to_string(),
            json_logs: false,
            low_confidence_threshold: DEFAULT_LOW_CONFIDENCE_THRESHOLD,
            anomaly: AnomalyConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: parse_var("PORT").unwrap_or(defaults.port),

            model_path: constants::get_model_path(),

            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),

            json_logs: env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.json_logs),

            low_confidence_threshold: parse_var("LOW_CONFIDENCE_THRESHOLD")
                .unwrap_or(defaults.low_confidence_threshold),

            anomaly: AnomalyConfig {
                z_threshold: parse_var("ANOMALY_Z_THRESHOLD").unwrap_or(defaults.anomaly.z_threshold),
                min_group_size: parse_var("ANOMALY_MIN_GROUP_SIZE")
                    .unwrap_or(defaults.anomaly.min_group_size),
                score_scale: parse_var("ANOMALY_SCORE_SCALE").unwrap_or(defaults.anomaly.score_scale),
                max_flag_fraction: parse_var("ANOMALY_MAX_FLAG_FRACTION")
                    .or(defaults.anomaly.max_flag_fraction),
            },
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
