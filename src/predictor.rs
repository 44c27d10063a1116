//! The prediction pipeline: demographics check, series validation, feature
//! encoding, two guarded ensemble calls, fusion. One `calculate_score`
//! invocation runs the stages sequentially on one logical thread; the only
//! suspension point is the guard deadline.

use crate::error::{ModelFamily, Result, StatusCode};
use crate::features::{Demographics, FeatureEncoder};
use crate::fuse::{ScoreFuser, VoteBreakdown};
use crate::guard::ExecutionGuard;
use crate::model::ModelStore;
use crate::observe::{Stage, StageObserver, TracingObserver};
use crate::series::{SeriesSource, SeriesValidator};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Terminal output of one invocation. Constructed once, immutable after,
/// never persisted here; persistence belongs to the task-queue collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub status_code: StatusCode,
    /// `null` on every failure path.
    pub score: Option<ScoreValue>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ScoreValue {
    /// Production: integer 0-100.
    Point(u8),
    /// Debug: the three unsnapped partial votes.
    Votes(VoteBreakdown),
}

pub struct Predictor {
    store: Arc<ModelStore>,
    guard: ExecutionGuard,
    validator: SeriesValidator,
    encoder: FeatureEncoder,
    observer: Arc<dyn StageObserver>,
}

impl Predictor {
    pub fn new(store: ModelStore, timeout: Duration) -> Result<Self> {
        Self::with_observer(store, timeout, Arc::new(TracingObserver))
    }

    pub fn with_observer(
        store: ModelStore,
        timeout: Duration,
        observer: Arc<dyn StageObserver>,
    ) -> Result<Self> {
        Ok(Self {
            store: Arc::new(store),
            guard: ExecutionGuard::new(timeout)?,
            validator: SeriesValidator::new(),
            encoder: FeatureEncoder::new(),
            observer,
        })
    }

    /// Score one household. `male` and `solo` are 0/1 flags as delivered by
    /// the task queue.
    ///
    /// Production (`debug = false`): always returns `Ok`; every failure is
    /// folded into a `(status_code, score: None)` result. Debug
    /// (`debug = true`): failures propagate as typed errors and success
    /// carries the unsnapped vote breakdown.
    pub fn calculate_score(
        &self,
        age: i64,
        male: i64,
        edu: i64,
        solo: i64,
        source: &dyn SeriesSource,
        debug: bool,
    ) -> Result<PredictionResult> {
        let invocation = Uuid::new_v4();
        match self.run_pipeline(invocation, age, male, edu, solo, source, debug) {
            Ok(result) => Ok(result),
            Err(e) if debug => Err(e),
            Err(e) => {
                let status_code = e.status_code();
                self.observer.record(
                    invocation,
                    "prediction_failed",
                    &serde_json::json!({
                        "status_code": status_code.code(),
                        "error": e.to_string(),
                    }),
                );
                Ok(PredictionResult {
                    status_code,
                    score: None,
                })
            }
        }
    }

    fn run_pipeline(
        &self,
        invocation: Uuid,
        age: i64,
        male: i64,
        edu: i64,
        solo: i64,
        source: &dyn SeriesSource,
        debug: bool,
    ) -> Result<PredictionResult> {
        // Demographic domain checks precede all series and model work.
        let demo = Demographics::from_raw(age, male, edu, solo)?;

        self.observer.stage_started(invocation, Stage::Validating);
        let series = source.load()?;
        self.validator.validate(&series)?;
        self.observer.stage_finished(invocation, Stage::Validating);

        self.observer.stage_started(invocation, Stage::Encoding);
        let features = self.encoder.encode(&demo, &series)?;
        self.observer.stage_finished(invocation, Stage::Encoding);

        // The two ensembles run sequentially with independent deadlines.
        self.observer.stage_started(invocation, Stage::TreePredicting);
        let tree = {
            let store = Arc::clone(&self.store);
            let x = features.tree_raw.clone();
            self.guard
                .run(ModelFamily::Tree, move || store.tree.predict(&x))?
        };
        self.observer.stage_finished(invocation, Stage::TreePredicting);

        self.observer
            .stage_started(invocation, Stage::LogisticPredicting);
        let logistic = {
            let store = Arc::clone(&self.store);
            let x = features.logistic_raw.to_vec();
            self.guard
                .run(ModelFamily::Logistic, move || store.logistic.predict(&x))?
        };
        self.observer
            .stage_finished(invocation, Stage::LogisticPredicting);

        self.observer.stage_started(invocation, Stage::Fusing);
        let votes = ScoreFuser::fuse(tree, logistic);
        self.observer.stage_finished(invocation, Stage::Fusing);

        self.observer.record(
            invocation,
            "prediction_complete",
            &serde_json::json!({
                "tree": votes.tree,
                "logistic": votes.logistic,
                "fused": votes.fused,
            }),
        );
        self.observer.stage_finished(invocation, Stage::Done);

        let score = if debug {
            ScoreValue::Votes(votes)
        } else {
            ScoreValue::Point(ScoreFuser::score(ScoreFuser::snap(votes.fused)))
        };
        Ok(PredictionResult {
            status_code: StatusCode::Success,
            score: Some(score),
        })
    }
}
