//! Maestro Normalizer
//!
//! Three ordered repair passes that turn a possibly-inconsistent generator
//! definition into a structurally valid graph:
//!
//! 1. [`sanitize`]: keep only executable activities, drop edges that
//!    reference nothing the later passes can reconcile.
//! 2. [`expand`]: rewrite edges whose `from` is a parallelGroup label into
//!    one edge per group member.
//! 3. [`repair`]: infer parents for edges the generator left without a
//!    `from`.
//!
//! The normalizer favors best-effort repair over failure: its input is
//! assumed imperfect, so problems are recovered by dropping (with a
//! diagnostic) rather than erroring. It guarantees that every surviving edge
//! references an existing activity, but never proves acyclicity; cycles are
//! caught at execution time.

mod expand;
mod repair;
mod sanitize;

use maestro_config::WorkflowDefinition;

pub use expand::expand;
pub use repair::repair;
pub use sanitize::sanitize;

/// Field names assumed incomplete when the generator does not say otherwise.
pub const DEFAULT_MANUAL_FIELDS: [&str; 2] = ["retryPolicy", "timeoutSeconds"];

/// Normalize a definition in place.
///
/// Idempotent: normalizing an already-normalized definition changes nothing.
pub fn normalize(def: &mut WorkflowDefinition) {
  sanitize(def);
  expand(def);
  repair(def);

  if def.manual_fields.is_none() {
    def.manual_fields = Some(
      DEFAULT_MANUAL_FIELDS
        .iter()
        .map(|f| f.to_string())
        .collect(),
    );
  }
}
