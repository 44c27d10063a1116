//! Soft-voting fusion of the two ensemble probabilities and the mapping to
//! an integer 0-100 score.

use serde::Serialize;

/// Boundary-snapping constants around the clinical decision threshold.
/// Empirically chosen during model calibration; literal contract values.
pub const SNAP_LOWER: f64 = 0.46;
pub const SNAP_PIVOT: f64 = 0.467;
pub const SNAP_UPPER: f64 = 0.47;

/// The three partial votes exposed by debug mode, always unsnapped.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VoteBreakdown {
    pub tree: f64,
    pub logistic: f64,
    pub fused: f64,
}

pub struct ScoreFuser;

impl ScoreFuser {
    /// Arithmetic mean of the two family probabilities.
    pub fn fuse(tree: f64, logistic: f64) -> VoteBreakdown {
        VoteBreakdown {
            tree,
            logistic,
            fused: (tree + logistic) / 2.0,
        }
    }

    /// Production-only snapping: probabilities just above the pivot snap up
    /// to 0.470, probabilities in [0.46, pivot] snap down to 0.460.
    pub fn snap(p: f64) -> f64 {
        if p > SNAP_PIVOT && p < SNAP_UPPER {
            SNAP_UPPER
        } else if p >= SNAP_LOWER && p <= SNAP_PIVOT {
            SNAP_LOWER
        } else {
            p
        }
    }

    /// `floor(p * 100)` as an integer 0-100.
    pub fn score(p: f64) -> u8 {
        (p * 100.0).floor().clamp(0.0, 100.0) as u8
    }
}
