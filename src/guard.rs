//! Wall-clock deadline around each ensemble call. The deadline is per-call
//! state, never process-global, so concurrent invocations cannot disturb
//! each other's timers. Cancellation is best-effort: a computation that
//! outlives its deadline keeps running on the blocking pool, but its result
//! is discarded.

use crate::error::{ModelFamily, PredictorError, Result};
use std::time::Duration;
use tokio::runtime::Runtime;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

pub struct ExecutionGuard {
    runtime: Runtime,
    deadline: Duration,
}

impl ExecutionGuard {
    pub fn new(deadline: Duration) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("mci-guard")
            .enable_time()
            .build()
            .map_err(|e| PredictorError::Unexpected(format!("guard runtime: {e}")))?;
        Ok(Self { runtime, deadline })
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Run `task` under the deadline. The timer is disarmed on any return,
    /// success or failure, so it never leaks into the next call.
    pub fn run<T, F>(&self, family: ModelFamily, task: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let limit = self.deadline;
        self.runtime.block_on(async move {
            let handle = tokio::task::spawn_blocking(task);
            match tokio::time::timeout(limit, handle).await {
                Err(_) => Err(PredictorError::Timeout { family, limit }),
                Ok(Err(join)) => {
                    if join.is_panic() {
                        Err(PredictorError::Unexpected(format!(
                            "{family} prediction panicked"
                        )))
                    } else {
                        Err(PredictorError::Unexpected(join.to_string()))
                    }
                }
                Ok(Ok(result)) => result,
            }
        })
    }
}
