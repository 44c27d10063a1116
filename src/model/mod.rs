//! Pretrained classifier ensembles and their soft-voting predict operation.

mod gbdt;
mod loader;
mod logistic;
mod scaler;

pub use gbdt::GbdtModel;
pub use loader::ModelStore;
pub use logistic::LogisticModel;
pub use scaler::StandardScaler;

use crate::error::{ModelFamily, PredictorError, Result};

/// Expected cardinality of the tree-family directory.
pub const TREE_ENSEMBLE_SIZE: usize = 500;
/// Expected cardinality of the logistic-family directory.
pub const LOGISTIC_ENSEMBLE_SIZE: usize = 50;

/// A single pretrained member classifier. Implementations are immutable
/// after load and safe to call from any thread.
pub trait Classifier: Send + Sync {
    /// Class-1 probability for one input vector.
    fn predict_proba(&self, x: &[f64]) -> std::result::Result<f64, String>;

    /// Input width the member was trained on.
    fn num_features(&self) -> usize;
}

pub(crate) fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Ordered, fixed-cardinality collection of classifiers sharing one scaler.
/// The tree family additionally carries the feature-selection mask applied
/// between scaling and member evaluation.
#[derive(Debug)]
pub struct Ensemble<M: Classifier> {
    family: ModelFamily,
    members: Vec<M>,
    scaler: StandardScaler,
    selection: Option<Vec<bool>>,
}

impl<M: Classifier> Ensemble<M> {
    /// Construction is where every width and cardinality contract is
    /// enforced; a mismatch here is a configuration error, never deferred
    /// to prediction time.
    pub fn new(
        family: ModelFamily,
        members: Vec<M>,
        scaler: StandardScaler,
        selection: Option<Vec<bool>>,
        expected_count: usize,
    ) -> Result<Self> {
        if members.len() != expected_count {
            return Err(PredictorError::ModelFormat {
                family,
                message: format!(
                    "expected {expected_count} models, found {}",
                    members.len()
                ),
            });
        }
        let input_width = match &selection {
            Some(mask) => {
                if mask.len() != scaler.len() {
                    return Err(PredictorError::ModelFormat {
                        family,
                        message: format!(
                            "selection mask has {} entries, scaler expects {}",
                            mask.len(),
                            scaler.len()
                        ),
                    });
                }
                mask.iter().filter(|&&b| b).count()
            }
            None => scaler.len(),
        };
        for (i, member) in members.iter().enumerate() {
            if member.num_features() != input_width {
                return Err(PredictorError::ModelFormat {
                    family,
                    message: format!(
                        "member {i} expects {} features, pipeline provides {input_width}",
                        member.num_features()
                    ),
                });
            }
        }
        Ok(Self {
            family,
            members,
            scaler,
            selection,
        })
    }

    pub fn family(&self) -> ModelFamily {
        self.family
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Soft voting: scale, project, then average every member's class-1
    /// probability. A single member failure aborts the whole call; partial
    /// results are discarded, never averaged over a subset.
    pub fn predict(&self, raw: &[f64]) -> Result<f64> {
        let scaled = self.scaler.transform(raw).map_err(|message| {
            PredictorError::Predict {
                family: self.family,
                message,
            }
        })?;
        let x: Vec<f64> = match &self.selection {
            Some(mask) => scaled
                .iter()
                .zip(mask)
                .filter(|(_, &keep)| keep)
                .map(|(&v, _)| v)
                .collect(),
            None => scaled,
        };

        let mut sum = 0.0;
        for (i, member) in self.members.iter().enumerate() {
            let p = member.predict_proba(&x).map_err(|e| PredictorError::Predict {
                family: self.family,
                message: format!("member {i}: {e}"),
            })?;
            sum += p;
        }
        Ok(sum / self.members.len() as f64)
    }
}
