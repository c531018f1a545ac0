//! Maestro Config
//!
//! This crate contains the serializable workflow definition types for maestro.
//! A definition arrives as untrusted JSON from an external generator (an
//! LLM-backed tool), so the types here mirror the generator's wire format
//! exactly: camelCase field names, nullable optionals, and an activity `type`
//! tag that may name kinds the engine does not support.
//!
//! [`validate`] is the structural gate: it walks a raw [`serde_json::Value`]
//! in a fixed field order and either produces a typed [`WorkflowDefinition`]
//! or fails with a [`SchemaViolation`] naming the first offending field path.
//! Referential integrity and acyclicity are deliberately NOT checked here;
//! the normalizer and executor own those concerns.

mod activity;
mod edge;
mod error;
mod validate;
mod workflow;

pub use activity::{Activity, ActivityKind, HttpMethod, RetryPolicy};
pub use edge::Dependency;
pub use error::SchemaViolation;
pub use validate::validate;
pub use workflow::WorkflowDefinition;
