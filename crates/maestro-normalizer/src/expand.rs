use std::collections::HashMap;

use maestro_config::{Dependency, WorkflowDefinition};

/// Pass 2: expand parallel-group edges.
///
/// A raw edge may use a parallelGroup label as its `from`, meaning "after
/// every member of this group". Such an edge becomes one edge per member
/// activity id and the group-labelled original is discarded. Labels never
/// appear as `to` (pass 1 guarantees it), so after this pass no group label
/// survives in the edge list.
pub fn expand(def: &mut WorkflowDefinition) {
  let mut groups: HashMap<&str, Vec<&str>> = HashMap::new();
  for activity in &def.activities {
    if let Some(group) = activity.parallel_group.as_deref() {
      groups.entry(group).or_default().push(activity.id.as_str());
    }
  }

  let mut expanded = Vec::with_capacity(def.dependencies.len());
  for dep in &def.dependencies {
    match groups.get(dep.from.as_str()) {
      Some(members) => {
        for member in members {
          expanded.push(Dependency {
            from: member.to_string(),
            to: dep.to.clone(),
          });
        }
      }
      None => expanded.push(dep.clone()),
    }
  }
  def.dependencies = expanded;
}
