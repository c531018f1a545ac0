//! The dynamic scheduling loop.

use std::collections::{HashMap, HashSet};

use futures::StreamExt;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use maestro_config::{Activity, WorkflowDefinition};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::error::ExecutionError;
use crate::input::{resolve_inputs, substitute};
use crate::invoker::{ActivityCall, ActivityInvoker, InvocationError};
use crate::result::{ExecutionResult, ResultTable};

type InFlight<'a> = FuturesUnordered<BoxFuture<'a, (String, Result<Value, InvocationError>)>>;

/// Execute a workflow definition against the given invoker.
///
/// Per-activity lifecycle: pending until every declared parent has
/// completed, then dispatched immediately (no concurrency cap), then
/// completed, or failed, which is terminal for the whole run. Dispatch
/// order among simultaneously runnable activities is unspecified.
///
/// The in-flight set is awaited one completion at a time, and grows between
/// waits: a successor unblocked by the completion just observed is dispatched
/// while slower activities of the previous wave are still running.
#[instrument(name = "workflow_execute", skip(def, invoker), fields(workflow = %def.name))]
pub async fn execute<I>(
  def: &WorkflowDefinition,
  invoker: &I,
) -> Result<ExecutionResult, ExecutionError>
where
  I: ActivityInvoker + ?Sized,
{
  let execution_id = uuid::Uuid::new_v4().to_string();

  info!(
    execution_id = %execution_id,
    workflow = %def.name,
    activities = def.activities.len(),
    "workflow_started"
  );

  let activities: HashMap<&str, &Activity> =
    def.activities.iter().map(|a| (a.id.as_str(), a)).collect();

  // Parent map from edges whose BOTH endpoints exist among the activities.
  // Anything else is dropped with a diagnostic: an edge that slipped past
  // normalization is never trusted blindly at run time.
  let mut parents: HashMap<String, Vec<String>> = HashMap::new();
  for dep in &def.dependencies {
    if activities.contains_key(dep.from.as_str()) && activities.contains_key(dep.to.as_str()) {
      parents
        .entry(dep.to.clone())
        .or_default()
        .push(dep.from.clone());
    } else {
      warn!(
        execution_id = %execution_id,
        from = %dep.from,
        to = %dep.to,
        "ignoring dependency with unknown endpoint"
      );
    }
  }

  let mut pending: HashSet<String> = activities.keys().map(|id| id.to_string()).collect();
  let mut completed: HashSet<String> = HashSet::new();
  let mut results = ResultTable::new();
  let mut in_flight: InFlight<'_> = FuturesUnordered::new();

  while !pending.is_empty() || !in_flight.is_empty() {
    // 1. Dispatch every pending activity whose parents have all completed.
    let runnable: Vec<String> = pending
      .iter()
      .filter(|id| {
        parents
          .get(*id)
          .is_none_or(|ps| ps.iter().all(|p| completed.contains(p)))
      })
      .cloned()
      .collect();

    for id in runnable {
      pending.remove(&id);
      let Some(activity) = activities.get(id.as_str()).copied() else {
        warn!(execution_id = %execution_id, activity_id = %id, "no activity record for pending id, dropping");
        continue;
      };

      let endpoint = substitute(&activity.endpoint, &results);
      let payload = resolve_inputs(&activity.inputs, &results);

      info!(
        execution_id = %execution_id,
        activity_id = %id,
        method = %activity.method,
        endpoint = %endpoint,
        "activity_started"
      );

      let call = ActivityCall {
        activity_id: id,
        method: activity.method,
        endpoint,
        payload,
        timeout_seconds: activity.timeout_seconds,
      };
      in_flight.push(Box::pin(async move {
        let id = call.activity_id.clone();
        (id, invoker.invoke(call).await)
      }));
    }

    // 2. Suspend until the FIRST in-flight activity finishes.
    match in_flight.next().await {
      Some((id, Ok(output))) => {
        info!(execution_id = %execution_id, activity_id = %id, "activity_completed");
        results.insert(id.clone(), output);
        completed.insert(id);
      }
      Some((id, Err(source))) => {
        error!(
          execution_id = %execution_id,
          activity_id = %id,
          error = %source,
          "workflow_failed"
        );
        return Err(ExecutionError::ActivityFailed {
          activity_id: id,
          source,
        });
      }
      // 3. Nothing is executing. If anything is still pending, no progress
      // is possible: a cycle or an unreachable parent.
      None => {
        if !pending.is_empty() {
          error!(
            execution_id = %execution_id,
            pending = pending.len(),
            "workflow_failed"
          );
          return Err(ExecutionError::DeadlockDetected {
            pending: pending.len(),
          });
        }
      }
    }
  }

  info!(
    execution_id = %execution_id,
    completed = completed.len(),
    "workflow_completed"
  );

  Ok(ExecutionResult {
    execution_id,
    results,
  })
}
