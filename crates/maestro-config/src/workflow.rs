use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::edge::Dependency;

/// A workflow definition as produced by the external generator.
///
/// Created once per generation, mutated in place by normalization, then read
/// by a single execution. It carries no state across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
  pub name: String,
  /// The activity id designated to start a run. Informational: the scheduler
  /// derives start order from the dependency relation, not from this field.
  pub entrypoint: String,
  pub activities: Vec<Activity>,
  pub dependencies: Vec<Dependency>,
  /// Names of fields the generator deliberately left incomplete
  /// (e.g. retry/timeout policy), signalling "needs human review".
  /// Filled with a default list by normalization when absent.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub manual_fields: Option<Vec<String>>,
}

impl WorkflowDefinition {
  /// Look up an activity by id.
  pub fn activity(&self, id: &str) -> Option<&Activity> {
    self.activities.iter().find(|a| a.id == id)
  }
}
