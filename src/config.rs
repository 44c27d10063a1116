//! Predictor configuration. Model paths and the guard deadline are host
//! deployment concerns; window boundaries, ensemble cardinalities, and the
//! snapping constants are contract values baked into the code.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Model and scaler locations
    pub models: ModelsConfig,
    /// Per-ensemble deadline
    pub guard: GuardConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Directory of GBDT model dumps (expected cardinality 500)
    pub tree_models_dir: PathBuf,
    /// Directory of logistic model dumps (expected cardinality 50)
    pub logistic_models_dir: PathBuf,
    /// Standardizing scaler for the 57-feature tree input
    pub tree_scaler_path: PathBuf,
    /// Standardizing scaler for the 4-feature logistic input
    pub logistic_scaler_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Wall-clock deadline per ensemble call (seconds)
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            models: ModelsConfig::default(),
            guard: GuardConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            tree_models_dir: PathBuf::from("models/gbdt"),
            logistic_models_dir: PathBuf::from("models/logistic"),
            tree_scaler_path: PathBuf::from("scaler/gbdt_scaler.json"),
            logistic_scaler_path: PathBuf::from("scaler/logistic_scaler.json"),
        }
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self { timeout_secs: 1 }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl PredictorConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<PredictorConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }
}
