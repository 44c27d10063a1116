//! Construction-time loading of both ensembles from already-exported model
//! dumps. Directory layout and export format are the training pipeline's
//! contract; everything here is checked once, before any prediction runs.

use super::{
    Ensemble, GbdtModel, LogisticModel, StandardScaler, LOGISTIC_ENSEMBLE_SIZE,
    TREE_ENSEMBLE_SIZE,
};
use crate::config::ModelsConfig;
use crate::error::{ModelFamily, PredictorError, Result};
use crate::features::{LOGISTIC_FEATURE_LEN, RAW_FEATURE_LEN, SANITIZER};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// Both loaded ensembles. Read-only after construction; share via `Arc`
/// across concurrent invocations.
#[derive(Debug)]
pub struct ModelStore {
    pub tree: Ensemble<GbdtModel>,
    pub logistic: Ensemble<LogisticModel>,
}

impl ModelStore {
    pub fn load(config: &ModelsConfig) -> Result<Self> {
        let tree_scaler = load_scaler(&config.tree_scaler_path, ModelFamily::Tree)?;
        if tree_scaler.len() != RAW_FEATURE_LEN {
            return Err(PredictorError::ModelFormat {
                family: ModelFamily::Tree,
                message: format!(
                    "scaler covers {} features, encoder produces {RAW_FEATURE_LEN}",
                    tree_scaler.len()
                ),
            });
        }
        let logistic_scaler = load_scaler(&config.logistic_scaler_path, ModelFamily::Logistic)?;
        if logistic_scaler.len() != LOGISTIC_FEATURE_LEN {
            return Err(PredictorError::ModelFormat {
                family: ModelFamily::Logistic,
                message: format!(
                    "scaler covers {} features, encoder produces {LOGISTIC_FEATURE_LEN}",
                    logistic_scaler.len()
                ),
            });
        }

        let tree_members: Vec<GbdtModel> =
            load_members(&config.tree_models_dir, ModelFamily::Tree, |m: &GbdtModel| {
                m.validate()
            })?;
        let logistic_members: Vec<LogisticModel> = load_members(
            &config.logistic_models_dir,
            ModelFamily::Logistic,
            |m: &LogisticModel| m.validate(),
        )?;

        let tree = Ensemble::new(
            ModelFamily::Tree,
            tree_members,
            tree_scaler,
            Some(SANITIZER.to_vec()),
            TREE_ENSEMBLE_SIZE,
        )?;
        let logistic = Ensemble::new(
            ModelFamily::Logistic,
            logistic_members,
            logistic_scaler,
            None,
            LOGISTIC_ENSEMBLE_SIZE,
        )?;

        info!(
            tree_members = tree.len(),
            logistic_members = logistic.len(),
            "model store loaded"
        );
        Ok(Self { tree, logistic })
    }
}

fn load_scaler(path: &Path, family: ModelFamily) -> Result<StandardScaler> {
    let data = std::fs::read_to_string(path).map_err(|_| PredictorError::ModelNotFound {
        family,
        message: format!("scaler file missing: {}", path.display()),
    })?;
    serde_json::from_str(&data).map_err(|e| PredictorError::ModelFormat {
        family,
        message: format!("{}: {e}", path.display()),
    })
}

/// Scan one model directory for `*.json` dumps, sorted by file name so the
/// ensemble order is deterministic across hosts.
fn load_members<M, V>(dir: &Path, family: ModelFamily, validate: V) -> Result<Vec<M>>
where
    M: DeserializeOwned,
    V: Fn(&M) -> std::result::Result<(), String>,
{
    if !dir.is_dir() {
        return Err(PredictorError::ModelNotFound {
            family,
            message: format!("model directory missing: {}", dir.display()),
        });
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut members = Vec::with_capacity(paths.len());
    for path in &paths {
        let data = std::fs::read_to_string(path).map_err(|e| PredictorError::ModelFormat {
            family,
            message: format!("{}: {e}", path.display()),
        })?;
        let member: M = serde_json::from_str(&data).map_err(|e| PredictorError::ModelFormat {
            family,
            message: format!("{}: {e}", path.display()),
        })?;
        validate(&member).map_err(|e| PredictorError::ModelFormat {
            family,
            message: format!("{}: {e}", path.display()),
        })?;
        members.push(member);
    }
    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelsConfig;
    use std::path::Path;

    fn write(path: &Path, body: &str) {
        std::fs::write(path, body).unwrap();
    }

    const STUMP: &str = r#"{
        "num_features": 15,
        "trees": [{
            "split_feature": [0],
            "threshold": [1e9],
            "left_child": [-1],
            "right_child": [-2],
            "leaf_value": [0.0, 0.0]
        }]
    }"#;

    fn fixture(dir: &Path, n_tree: usize, n_logistic: usize) -> ModelsConfig {
        let tree_dir = dir.join("gbdt");
        let logi_dir = dir.join("logistic");
        std::fs::create_dir_all(&tree_dir).unwrap();
        std::fs::create_dir_all(&logi_dir).unwrap();
        for i in 0..n_tree {
            write(&tree_dir.join(format!("model_{i:03}.json")), STUMP);
        }
        for i in 0..n_logistic {
            write(
                &logi_dir.join(format!("model_{i:02}.json")),
                r#"{"weights": [0.0, 0.0, 0.0, 0.0], "intercept": 0.0}"#,
            );
        }
        let tree_scaler = dir.join("gbdt_scaler.json");
        let logistic_scaler = dir.join("logistic_scaler.json");
        write(
            &tree_scaler,
            &serde_json::json!({
                "mean": vec![0.0; RAW_FEATURE_LEN],
                "scale": vec![1.0; RAW_FEATURE_LEN],
            })
            .to_string(),
        );
        write(
            &logistic_scaler,
            r#"{"mean": [0.0, 0.0, 0.0, 0.0], "scale": [1.0, 1.0, 1.0, 1.0]}"#,
        );
        ModelsConfig {
            tree_models_dir: tree_dir,
            logistic_models_dir: logi_dir,
            tree_scaler_path: tree_scaler,
            logistic_scaler_path: logistic_scaler,
        }
    }

    #[test]
    fn loads_full_cardinality_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture(dir.path(), TREE_ENSEMBLE_SIZE, LOGISTIC_ENSEMBLE_SIZE);
        let store = ModelStore::load(&config).unwrap();
        assert_eq!(store.tree.len(), TREE_ENSEMBLE_SIZE);
        assert_eq!(store.logistic.len(), LOGISTIC_ENSEMBLE_SIZE);
    }

    #[test]
    fn short_tree_directory_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture(dir.path(), TREE_ENSEMBLE_SIZE - 1, LOGISTIC_ENSEMBLE_SIZE);
        let err = ModelStore::load(&config).unwrap_err();
        assert_eq!(err.status_code().code(), 301);
    }

    #[test]
    fn missing_logistic_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = fixture(dir.path(), 1, 1);
        config.logistic_models_dir = dir.path().join("nope");
        // Tree cardinality would also fail, but the logistic directory is
        // checked while collecting members, before ensemble construction.
        let err = ModelStore::load(&config).unwrap_err();
        assert_eq!(err.status_code().code(), 310);
    }

    #[test]
    fn missing_scaler_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = fixture(dir.path(), 1, 1);
        config.tree_scaler_path = dir.path().join("nope.json");
        let err = ModelStore::load(&config).unwrap_err();
        assert_eq!(err.status_code().code(), 300);
    }

    #[test]
    fn wrong_width_scaler_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture(dir.path(), 1, 1);
        write(
            &config.tree_scaler_path,
            r#"{"mean": [0.0, 0.0], "scale": [1.0, 1.0]}"#,
        );
        let err = ModelStore::load(&config).unwrap_err();
        assert_eq!(err.status_code().code(), 301);
    }
}
