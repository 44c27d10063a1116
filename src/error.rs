//! Status taxonomy shared with the task-queue collaborator. Closed set:
//! every failure path inside the predictor maps to exactly one code.

use serde::{Serialize, Serializer};
use std::time::Duration;
use thiserror::Error;

/// Which classifier family an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    Tree,
    Logistic,
}

impl ModelFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelFamily::Tree => "tree",
            ModelFamily::Logistic => "logistic",
        }
    }
}

impl std::fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric status codes returned to external callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum StatusCode {
    Success = 100,
    SeriesNotFound = 200,
    SeriesFormat = 201,
    SeriesShortage = 202,
    SeriesEmpty = 203,
    BehavioralFormat = 211,
    TreeModelNotFound = 300,
    TreeModelFormat = 301,
    TreePredict = 302,
    LogisticModelNotFound = 310,
    LogisticModelFormat = 311,
    LogisticPredict = 312,
    Timeout = 400,
    Unexpected = 900,
}

impl StatusCode {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn name(self) -> &'static str {
        match self {
            StatusCode::Success => "PredictionSuccess",
            StatusCode::SeriesNotFound => "ElectricDataNotFound",
            StatusCode::SeriesFormat => "ElectricDataFormatError",
            StatusCode::SeriesShortage => "ElectricDataShortage",
            StatusCode::SeriesEmpty => "ElectricDataEmpty",
            StatusCode::BehavioralFormat => "BehaviorDataFormatError",
            StatusCode::TreeModelNotFound => "ElectricModelNotFound",
            StatusCode::TreeModelFormat => "ElectricModelFormatError",
            StatusCode::TreePredict => "ElectricModelPredictError",
            StatusCode::LogisticModelNotFound => "BehaviorModelNotFound",
            StatusCode::LogisticModelFormat => "BehaviorModelFormatError",
            StatusCode::LogisticPredict => "BehaviorModelPredictError",
            StatusCode::Timeout => "PredictionTimeOut",
            StatusCode::Unexpected => "UnexpectedError",
        }
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}

/// Typed error raised in debug mode; production mode converts it to a
/// status code at the `calculate_score` boundary.
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("series not found: {0}")]
    SeriesNotFound(String),

    #[error("series format error: {0}")]
    SeriesFormat(String),

    #[error("series shortage: {0}")]
    SeriesShortage(String),

    #[error("series is empty")]
    SeriesEmpty,

    #[error("behavioral data format error: {0}")]
    BehavioralFormat(String),

    #[error("{family} model not found: {message}")]
    ModelNotFound { family: ModelFamily, message: String },

    #[error("{family} model format error: {message}")]
    ModelFormat { family: ModelFamily, message: String },

    #[error("{family} prediction failed: {message}")]
    Predict { family: ModelFamily, message: String },

    #[error("{family} prediction timed out after {limit:?}")]
    Timeout { family: ModelFamily, limit: Duration },

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl PredictorError {
    /// Total mapping onto the closed status-code set.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PredictorError::SeriesNotFound(_) => StatusCode::SeriesNotFound,
            PredictorError::SeriesFormat(_) => StatusCode::SeriesFormat,
            PredictorError::SeriesShortage(_) => StatusCode::SeriesShortage,
            PredictorError::SeriesEmpty => StatusCode::SeriesEmpty,
            PredictorError::BehavioralFormat(_) => StatusCode::BehavioralFormat,
            PredictorError::ModelNotFound { family, .. } => match family {
                ModelFamily::Tree => StatusCode::TreeModelNotFound,
                ModelFamily::Logistic => StatusCode::LogisticModelNotFound,
            },
            PredictorError::ModelFormat { family, .. } => match family {
                ModelFamily::Tree => StatusCode::TreeModelFormat,
                ModelFamily::Logistic => StatusCode::LogisticModelFormat,
            },
            PredictorError::Predict { family, .. } => match family {
                ModelFamily::Tree => StatusCode::TreePredict,
                ModelFamily::Logistic => StatusCode::LogisticPredict,
            },
            PredictorError::Timeout { .. } => StatusCode::Timeout,
            PredictorError::Unexpected(_) => StatusCode::Unexpected,
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictorError>;
