//! Gradient-boosted decision-tree member. Tree dumps use the flattened
//! node-array layout of the training toolchain: per-node parallel arrays,
//! with a negative child index `c` denoting leaf `-(c) - 1`.

use super::{sigmoid, Classifier};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GbdtModel {
    num_features: usize,
    trees: Vec<Tree>,
}

#[derive(Debug, Clone, Deserialize)]
struct Tree {
    split_feature: Vec<usize>,
    threshold: Vec<f64>,
    left_child: Vec<i32>,
    right_child: Vec<i32>,
    leaf_value: Vec<f64>,
}

impl Tree {
    fn validate(&self) -> Result<(), String> {
        let n = self.split_feature.len();
        if self.threshold.len() != n || self.left_child.len() != n || self.right_child.len() != n
        {
            return Err("inconsistent node array lengths".into());
        }
        if n == 0 || self.leaf_value.is_empty() {
            return Err("tree has no nodes".into());
        }
        Ok(())
    }

    fn evaluate(&self, x: &[f64]) -> Result<f64, String> {
        let mut node = 0usize;
        // Node count bounds the walk; a longer path means a malformed dump.
        for _ in 0..=self.split_feature.len() {
            let feature = self.split_feature[node];
            let value = *x
                .get(feature)
                .ok_or_else(|| format!("split feature {feature} out of range"))?;
            let child = if value <= self.threshold[node] {
                self.left_child[node]
            } else {
                self.right_child[node]
            };
            if child < 0 {
                let leaf = (-child - 1) as usize;
                return self
                    .leaf_value
                    .get(leaf)
                    .copied()
                    .ok_or_else(|| format!("leaf index {leaf} out of range"));
            }
            node = child as usize;
            if node >= self.split_feature.len() {
                return Err(format!("child index {node} out of range"));
            }
        }
        Err("cycle in tree structure".into())
    }
}

impl GbdtModel {
    /// Structural checks deferred from deserialization; called by the loader
    /// so a malformed dump is rejected at construction time.
    pub fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("model has no trees".into());
        }
        for tree in &self.trees {
            tree.validate()?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn stump_for_tests(num_features: usize, leaf: f64) -> Self {
        Self {
            num_features,
            trees: vec![Tree {
                split_feature: vec![0],
                threshold: vec![f64::INFINITY],
                left_child: vec![-1],
                right_child: vec![-2],
                leaf_value: vec![leaf, leaf],
            }],
        }
    }

    #[cfg(test)]
    pub(crate) fn broken_for_tests(num_features: usize) -> Self {
        Self {
            num_features,
            trees: vec![Tree {
                split_feature: vec![usize::MAX],
                threshold: vec![0.0],
                left_child: vec![-1],
                right_child: vec![-2],
                leaf_value: vec![0.0, 0.0],
            }],
        }
    }
}

impl Classifier for GbdtModel {
    /// Sigmoid over the summed raw leaf outputs of every tree.
    fn predict_proba(&self, x: &[f64]) -> Result<f64, String> {
        let mut raw = 0.0;
        for tree in &self.trees {
            raw += tree.evaluate(x)?;
        }
        Ok(sigmoid(raw))
    }

    fn num_features(&self) -> usize {
        self.num_features
    }
}
