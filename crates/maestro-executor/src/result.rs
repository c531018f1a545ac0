use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Run-scoped mapping from activity id to its invocation result.
///
/// Doubles as the substitution source for `${activityId.path}` placeholders
/// while the run is still in progress.
pub type ResultTable = HashMap<String, serde_json::Value>;

/// Result of a complete workflow execution.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExecutionResult {
  /// Unique execution id, fresh per run.
  pub execution_id: String,
  /// Results of every invoked activity, keyed by activity id.
  pub results: ResultTable,
}
