use thiserror::Error;

use crate::invoker::InvocationError;

/// Terminal failure of a run. Either variant aborts immediately; there is no
/// partial-success return.
#[derive(Debug, Error)]
pub enum ExecutionError {
  /// A remote call failed. In-flight siblings are not awaited, so the failed
  /// run's partial results are nondeterministic and deliberately discarded.
  #[error("activity '{activity_id}' failed: {source}")]
  ActivityFailed {
    activity_id: String,
    #[source]
    source: InvocationError,
  },

  /// No activity is executing but some are still pending: a cycle, or an
  /// edge naming a parent that can never complete.
  #[error("deadlock detected: {pending} pending activities can never start")]
  DeadlockDetected { pending: usize },
}
