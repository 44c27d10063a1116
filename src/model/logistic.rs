//! Logistic-regression member: class-1 probability is `sigmoid(w.x + b)`.

use super::{sigmoid, Classifier};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct LogisticModel {
    weights: Vec<f64>,
    intercept: f64,
}

impl LogisticModel {
    pub fn new(weights: Vec<f64>, intercept: f64) -> Self {
        Self { weights, intercept }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.weights.is_empty() {
            return Err("model has no weights".into());
        }
        Ok(())
    }
}

impl Classifier for LogisticModel {
    fn predict_proba(&self, x: &[f64]) -> Result<f64, String> {
        if x.len() != self.weights.len() {
            return Err(format!(
                "input has {} features, model expects {}",
                x.len(),
                self.weights.len()
            ));
        }
        let z: f64 = self
            .weights
            .iter()
            .zip(x)
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.intercept;
        Ok(sigmoid(z))
    }

    fn num_features(&self) -> usize {
        self.weights.len()
    }
}
