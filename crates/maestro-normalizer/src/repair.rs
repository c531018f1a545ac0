use maestro_config::{Dependency, WorkflowDefinition};
use tracing::warn;

/// Pass 3: infer parents for edges the generator left without a `from`.
///
/// Heuristic carried over from the generator's own repair logic: when the
/// `to` activity exists and carries no parallelGroup, assume it is a join
/// point and make every group-labelled activity a parent. Best-effort and
/// inherently ambiguous when multiple parallel groups converge; preserved
/// as-is rather than silently corrected. Edges that cannot be repaired are
/// dropped so the post-normalization graph stays structurally valid.
pub fn repair(def: &mut WorkflowDefinition) {
  let grouped: Vec<String> = def
    .activities
    .iter()
    .filter(|a| a.parallel_group.is_some())
    .map(|a| a.id.clone())
    .collect();

  let mut repaired = Vec::with_capacity(def.dependencies.len());
  for dep in def.dependencies.drain(..) {
    if !dep.from.is_empty() {
      repaired.push(dep);
      continue;
    }

    let target_is_plain = def
      .activities
      .iter()
      .any(|a| a.id == dep.to && a.parallel_group.is_none());
    if target_is_plain && !grouped.is_empty() {
      for parent in &grouped {
        repaired.push(Dependency {
          from: parent.clone(),
          to: dep.to.clone(),
        });
      }
    } else {
      warn!(to = %dep.to, "dropping parentless dependency that cannot be repaired");
    }
  }
  def.dependencies = repaired;
}

#[cfg(test)]
mod tests {
  use maestro_config::validate;
  use serde_json::json;

  use super::*;

  fn def_with_deps(deps: serde_json::Value) -> WorkflowDefinition {
    validate(&json!({
      "name": "wf",
      "entrypoint": "a",
      "activities": [
        { "id": "a", "type": "http_call", "method": "GET", "endpoint": "/a",
          "parallelGroup": "g" },
        { "id": "b", "type": "http_call", "method": "GET", "endpoint": "/b",
          "parallelGroup": "g" },
        { "id": "c", "type": "http_call", "method": "GET", "endpoint": "/c" }
      ],
      "dependencies": deps
    }))
    .unwrap()
  }

  #[test]
  fn infers_grouped_parents_for_parentless_edge() {
    let mut def = def_with_deps(json!([ { "to": "c" } ]));

    repair(&mut def);

    let pairs: Vec<(&str, &str)> = def
      .dependencies
      .iter()
      .map(|d| (d.from.as_str(), d.to.as_str()))
      .collect();
    assert_eq!(pairs, vec![("a", "c"), ("b", "c")]);
  }

  #[test]
  fn drops_parentless_edge_targeting_grouped_activity() {
    let mut def = def_with_deps(json!([ { "to": "b" } ]));

    repair(&mut def);

    assert!(def.dependencies.is_empty());
  }

  #[test]
  fn leaves_complete_edges_untouched() {
    let mut def = def_with_deps(json!([ { "from": "a", "to": "c" } ]));

    repair(&mut def);

    assert_eq!(def.dependencies.len(), 1);
  }
}
