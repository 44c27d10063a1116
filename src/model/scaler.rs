//! Pre-fitted affine standardization: `(x - mean) / scale` per feature.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "ScalerBlob")]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

#[derive(Deserialize)]
struct ScalerBlob {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl TryFrom<ScalerBlob> for StandardScaler {
    type Error = String;

    fn try_from(blob: ScalerBlob) -> Result<Self, String> {
        StandardScaler::new(blob.mean, blob.scale)
    }
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, String> {
        if mean.len() != scale.len() {
            return Err(format!(
                "mean has {} entries, scale has {}",
                mean.len(),
                scale.len()
            ));
        }
        if mean.is_empty() {
            return Err("scaler is empty".into());
        }
        if scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return Err("scale entries must be finite and non-zero".into());
        }
        Ok(Self { mean, scale })
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    pub fn transform(&self, x: &[f64]) -> Result<Vec<f64>, String> {
        if x.len() != self.mean.len() {
            return Err(format!(
                "input has {} features, scaler expects {}",
                x.len(),
                self.mean.len()
            ));
        }
        Ok(x.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standardizes_per_feature() {
        let scaler = StandardScaler::new(vec![10.0, 0.0], vec![2.0, 0.5]).unwrap();
        let out = scaler.transform(&[14.0, 1.0]).unwrap();
        assert_eq!(out, vec![2.0, 2.0]);
    }

    #[test]
    fn width_mismatch_is_an_error() {
        let scaler = StandardScaler::new(vec![0.0], vec![1.0]).unwrap();
        assert!(scaler.transform(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn degenerate_blobs_are_rejected() {
        assert!(StandardScaler::new(vec![0.0], vec![0.0]).is_err());
        assert!(StandardScaler::new(vec![0.0, 1.0], vec![1.0]).is_err());
        assert!(StandardScaler::new(vec![], vec![]).is_err());
    }

    #[test]
    fn deserializes_from_blob_layout() {
        let scaler: StandardScaler =
            serde_json::from_str(r#"{"mean": [1.0, 2.0], "scale": [1.0, 4.0]}"#).unwrap();
        assert_eq!(scaler.len(), 2);
        assert_eq!(scaler.transform(&[1.0, 10.0]).unwrap(), vec![0.0, 2.0]);
    }
}
