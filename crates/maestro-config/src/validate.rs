//! Structural validation of a raw candidate definition.
//!
//! The walk order is fixed so that a given malformed value always reports
//! the same (first) violation: root, `name`, `entrypoint`, `activities`
//! (element by element, field by field), `dependencies`, `manualFields`.
//!
//! This is acceptance only. Dangling edges, duplicate ids, and cycles are
//! downstream concerns: the normalizer repairs what it can and the executor
//! fails the rest at run time.

use serde_json::Value;

use crate::error::SchemaViolation;
use crate::workflow::WorkflowDefinition;

/// Validate a raw JSON value and produce a typed [`WorkflowDefinition`].
///
/// Fails with a [`SchemaViolation`] naming the first offending field path.
pub fn validate(raw: &Value) -> Result<WorkflowDefinition, SchemaViolation> {
  let root = raw
    .as_object()
    .ok_or_else(|| SchemaViolation::new("", "expected an object"))?;

  require_string(root.get("name"), "name")?;
  require_string(root.get("entrypoint"), "entrypoint")?;

  let activities = root
    .get("activities")
    .and_then(Value::as_array)
    .ok_or_else(|| SchemaViolation::new("activities", "expected an array"))?;
  for (i, activity) in activities.iter().enumerate() {
    check_activity(activity, i)?;
  }

  let dependencies = root
    .get("dependencies")
    .and_then(Value::as_array)
    .ok_or_else(|| SchemaViolation::new("dependencies", "expected an array"))?;
  for (i, dependency) in dependencies.iter().enumerate() {
    check_dependency(dependency, i)?;
  }

  if let Some(manual) = root.get("manualFields").filter(|v| !v.is_null()) {
    let fields = manual
      .as_array()
      .ok_or_else(|| SchemaViolation::new("manualFields", "expected an array"))?;
    for (i, field) in fields.iter().enumerate() {
      require_string(Some(field), &format!("manualFields[{}]", i))?;
    }
  }

  // The walk above guarantees this conversion succeeds for every field it
  // checked; serde fills defaults for the optional ones.
  serde_json::from_value(raw.clone())
    .map_err(|e| SchemaViolation::new("", format!("definition did not deserialize: {}", e)))
}

fn check_activity(value: &Value, index: usize) -> Result<(), SchemaViolation> {
  let path = |field: &str| format!("activities[{}].{}", index, field);

  let activity = value
    .as_object()
    .ok_or_else(|| SchemaViolation::new(format!("activities[{}]", index), "expected an object"))?;

  require_string(activity.get("id"), &path("id"))?;
  require_string(activity.get("type"), &path("type"))?;

  let method = require_string(activity.get("method"), &path("method"))?;
  if method != "GET" && method != "POST" {
    return Err(SchemaViolation::new(
      path("method"),
      format!("expected GET or POST, got '{}'", method),
    ));
  }

  require_string(activity.get("endpoint"), &path("endpoint"))?;

  if let Some(group) = activity.get("parallelGroup").filter(|v| !v.is_null())
    && !group.is_string()
  {
    return Err(SchemaViolation::new(
      path("parallelGroup"),
      "expected a string or null",
    ));
  }

  if let Some(policy) = activity.get("retryPolicy").filter(|v| !v.is_null()) {
    let policy = policy
      .as_object()
      .ok_or_else(|| SchemaViolation::new(path("retryPolicy"), "expected an object or null"))?;
    require_number(policy.get("maxAttempts"), &path("retryPolicy.maxAttempts"))?;
    require_number(
      policy.get("backoffSeconds"),
      &path("retryPolicy.backoffSeconds"),
    )?;
  }

  if let Some(timeout) = activity.get("timeoutSeconds").filter(|v| !v.is_null())
    && !timeout.is_number()
  {
    return Err(SchemaViolation::new(
      path("timeoutSeconds"),
      "expected a number or null",
    ));
  }

  if let Some(inputs) = activity.get("inputs").filter(|v| !v.is_null())
    && !inputs.is_object()
  {
    return Err(SchemaViolation::new(path("inputs"), "expected an object"));
  }

  Ok(())
}

fn check_dependency(value: &Value, index: usize) -> Result<(), SchemaViolation> {
  let dependency = value.as_object().ok_or_else(|| {
    SchemaViolation::new(format!("dependencies[{}]", index), "expected an object")
  })?;

  // `from` may be absent, null, or a string; the generator omits it when it
  // does not know the parents and the repair pass infers them.
  if let Some(from) = dependency.get("from").filter(|v| !v.is_null())
    && !from.is_string()
  {
    return Err(SchemaViolation::new(
      format!("dependencies[{}].from", index),
      "expected a string or null",
    ));
  }

  require_string(
    dependency.get("to"),
    &format!("dependencies[{}].to", index),
  )?;

  Ok(())
}

fn require_string<'a>(value: Option<&'a Value>, path: &str) -> Result<&'a str, SchemaViolation> {
  value
    .and_then(Value::as_str)
    .ok_or_else(|| SchemaViolation::new(path, "expected a string"))
}

fn require_number(value: Option<&Value>, path: &str) -> Result<f64, SchemaViolation> {
  value
    .and_then(Value::as_f64)
    .ok_or_else(|| SchemaViolation::new(path, "expected a number"))
}
