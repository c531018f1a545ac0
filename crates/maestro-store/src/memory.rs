use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{SavedWorkflow, StoreError, WorkflowStore};

/// In-memory repository. Contents live and die with the process.
#[derive(Default)]
pub struct MemoryStore {
  workflows: RwLock<HashMap<String, SavedWorkflow>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl WorkflowStore for MemoryStore {
  async fn put(&self, workflow: SavedWorkflow) -> Result<(), StoreError> {
    self
      .workflows
      .write()
      .await
      .insert(workflow.id.clone(), workflow);
    Ok(())
  }

  async fn get(&self, id: &str) -> Result<SavedWorkflow, StoreError> {
    self
      .workflows
      .read()
      .await
      .get(id)
      .cloned()
      .ok_or_else(|| StoreError::NotFound(id.to_string()))
  }

  async fn list(&self) -> Result<Vec<SavedWorkflow>, StoreError> {
    let mut workflows: Vec<SavedWorkflow> =
      self.workflows.read().await.values().cloned().collect();
    workflows.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
    Ok(workflows)
  }

  async fn delete(&self, id: &str) -> Result<(), StoreError> {
    self
      .workflows
      .write()
      .await
      .remove(id)
      .map(|_| ())
      .ok_or_else(|| StoreError::NotFound(id.to_string()))
  }
}
