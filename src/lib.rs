//! MCI risk predictor — scores household cognitive-impairment risk from
//! 28 days of per-minute appliance electricity signals plus demographics.
//!
//! Modular structure:
//! - [`series`] — Raw series parsing, shape/coverage validation
//! - [`features`] — Calendar, day/night usage, and interaction features
//! - [`model`] — Pretrained GBDT and logistic ensembles, soft voting
//! - [`guard`] — Per-call wall-clock deadline around ensemble calls
//! - [`fuse`] — Probability fusion, boundary snapping, integer score
//! - [`predictor`] — The staged pipeline and result/status taxonomy
//! - [`observe`] — Injectable telemetry at stage boundaries
//! - [`logging`] — Structured JSON logging

pub mod config;
pub mod error;
pub mod features;
pub mod fuse;
pub mod guard;
pub mod logging;
pub mod model;
pub mod observe;
pub mod predictor;
pub mod series;

pub use config::PredictorConfig;
pub use error::{ModelFamily, PredictorError, StatusCode};
pub use features::{Demographics, FeatureEncoder};
pub use fuse::{ScoreFuser, VoteBreakdown};
pub use guard::ExecutionGuard;
pub use model::ModelStore;
pub use observe::{NoopObserver, Stage, StageObserver, TracingObserver};
pub use predictor::{PredictionResult, Predictor, ScoreValue};
pub use series::{CsvSeriesSource, RawSeries, SeriesSource, SeriesValidator};
