//! Pluggable telemetry at pipeline stage boundaries. Logging is an injected
//! capability of the predictor, not a subclassing axis; the default sink
//! forwards to `tracing` and callers embedding the predictor can swap in
//! their own or silence it entirely.

use tracing::{debug, info};
use uuid::Uuid;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Encoding,
    TreePredicting,
    LogisticPredicting,
    Fusing,
    Done,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Validating => "validating",
            Stage::Encoding => "encoding",
            Stage::TreePredicting => "tree_predicting",
            Stage::LogisticPredicting => "logistic_predicting",
            Stage::Fusing => "fusing",
            Stage::Done => "done",
        }
    }
}

/// Structured-event sink invoked at well-defined stage boundaries. All
/// methods default to no-ops so implementors opt into what they need.
pub trait StageObserver: Send + Sync {
    fn stage_started(&self, _invocation: Uuid, _stage: Stage) {}

    fn stage_finished(&self, _invocation: Uuid, _stage: Stage) {}

    fn record(&self, _invocation: Uuid, _event: &str, _fields: &serde_json::Value) {}
}

/// Default sink: structured `tracing` events, one per boundary.
pub struct TracingObserver;

impl StageObserver for TracingObserver {
    fn stage_started(&self, invocation: Uuid, stage: Stage) {
        debug!(invocation = %invocation, stage = stage.as_str(), "stage started");
    }

    fn stage_finished(&self, invocation: Uuid, stage: Stage) {
        debug!(invocation = %invocation, stage = stage.as_str(), "stage finished");
    }

    fn record(&self, invocation: Uuid, event: &str, fields: &serde_json::Value) {
        info!(invocation = %invocation, event, fields = %fields, "predictor event");
    }
}

/// Silent sink for embedding contexts that own their own telemetry.
pub struct NoopObserver;

impl StageObserver for NoopObserver {}
