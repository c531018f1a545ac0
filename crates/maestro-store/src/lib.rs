//! Maestro Store
//!
//! Repository interface for saved workflow definitions. The core owns no
//! persisted state; whoever hosts it injects a [`WorkflowStore`]
//! implementation, never a process-wide singleton. [`MemoryStore`] is the
//! bundled implementation for tests and single-process use.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use maestro_config::WorkflowDefinition;
use serde::{Deserialize, Serialize};

/// Error type for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  /// The requested workflow was not found.
  #[error("workflow not found: {0}")]
  NotFound(String),
}

/// A definition put aside for later runs or human completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedWorkflow {
  pub id: String,
  pub name: String,
  pub saved_at: DateTime<Utc>,
  pub definition: WorkflowDefinition,
}

impl SavedWorkflow {
  /// Wrap a definition with a fresh id and the current timestamp.
  pub fn new(definition: WorkflowDefinition) -> Self {
    Self {
      id: format!("wf-saved-{}", uuid::Uuid::new_v4()),
      name: definition.name.clone(),
      saved_at: Utc::now(),
      definition,
    }
  }
}

/// Repository of saved workflow definitions.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
  /// Save a workflow, replacing any existing entry with the same id.
  async fn put(&self, workflow: SavedWorkflow) -> Result<(), StoreError>;

  /// Get a saved workflow by id.
  async fn get(&self, id: &str) -> Result<SavedWorkflow, StoreError>;

  /// List every saved workflow, most recently saved first.
  async fn list(&self) -> Result<Vec<SavedWorkflow>, StoreError>;

  /// Delete a saved workflow by id.
  async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
