//! Placeholder resolution against the run's result table.
//!
//! A placeholder has the shape `${activityId.field.path}`: the id of a
//! completed activity followed by a dotted path into its result. Resolution
//! degrades defensively: a reference to an activity that has not completed,
//! or a path that misses, leaves the placeholder text untouched rather than
//! failing the run.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::result::ResultTable;

static PLACEHOLDER: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

/// Substitute every resolvable placeholder in `text`.
pub fn substitute(text: &str, results: &ResultTable) -> String {
  PLACEHOLDER
    .replace_all(text, |caps: &Captures| {
      let reference = &caps[1];
      let mut path = reference.split('.');
      let activity_id = path.next().unwrap_or_default();
      match results.get(activity_id).and_then(|root| lookup(root, path)) {
        Some(value) => render(value),
        None => caps[0].to_string(),
      }
    })
    .into_owned()
}

/// Resolve an activity's input mapping. String values are substituted;
/// everything else passes through unchanged. Always yields a JSON object.
pub fn resolve_inputs(inputs: &HashMap<String, Value>, results: &ResultTable) -> Value {
  let mut resolved = serde_json::Map::new();
  for (key, value) in inputs {
    let value = match value {
      Value::String(text) => Value::String(substitute(text, results)),
      other => other.clone(),
    };
    resolved.insert(key.clone(), value);
  }
  Value::Object(resolved)
}

fn lookup<'a>(mut value: &'a Value, path: std::str::Split<'_, char>) -> Option<&'a Value> {
  for field in path {
    value = value.get(field)?;
  }
  Some(value)
}

/// Strings verbatim; scalars and compounds as their JSON text.
fn render(value: &Value) -> String {
  match value {
    Value::String(text) => text.clone(),
    other => other.to_string(),
  }
}
