use std::collections::HashSet;

use maestro_config::{ActivityKind, WorkflowDefinition};
use tracing::warn;

/// Pass 1: drop unexecutable activities, then drop unreconcilable edges.
///
/// The generator sometimes hallucinates control-flow node kinds (fork, join,
/// gateway); nothing downstream can run them, so they go, along with every
/// edge that touches them. An edge survives when its `to` is a surviving
/// activity id and its `from` is a surviving id, a parallelGroup label
/// (expanded by pass 2), or empty (repaired by pass 3).
pub fn sanitize(def: &mut WorkflowDefinition) {
  let before = def.activities.len();
  def.activities.retain(|a| {
    let keep = a.kind == ActivityKind::HttpCall;
    if !keep {
      warn!(activity_id = %a.id, kind = ?a.kind, "dropping activity of unsupported kind");
    }
    keep
  });
  let dropped = before - def.activities.len();

  let ids: HashSet<&str> = def.activities.iter().map(|a| a.id.as_str()).collect();
  let groups: HashSet<&str> = def
    .activities
    .iter()
    .filter_map(|a| a.parallel_group.as_deref())
    .collect();

  let mut surviving = Vec::with_capacity(def.dependencies.len());
  for dep in def.dependencies.drain(..) {
    let from_ok =
      dep.from.is_empty() || ids.contains(dep.from.as_str()) || groups.contains(dep.from.as_str());
    if from_ok && ids.contains(dep.to.as_str()) {
      surviving.push(dep);
    } else {
      warn!(
        from = %dep.from,
        to = %dep.to,
        "dropping dependency referencing unknown activity"
      );
    }
  }
  def.dependencies = surviving;

  if dropped > 0 {
    warn!(dropped, "sanitized unsupported activities out of definition");
  }
}
