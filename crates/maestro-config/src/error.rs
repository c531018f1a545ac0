use thiserror::Error;

/// A structural defect in a raw definition, located by field path.
///
/// Exactly one violation is reported per [`validate`](crate::validate) call:
/// the first one encountered in the validator's fixed check order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema violation at '{path}': {message}")]
pub struct SchemaViolation {
  /// Dotted/indexed path to the offending field, e.g. `activities[2].method`.
  pub path: String,
  pub message: String,
}

impl SchemaViolation {
  pub(crate) fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      message: message.into(),
    }
  }
}
