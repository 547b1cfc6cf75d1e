//! Persistence of the task collection in a key-value string store.
//!
//! The whole collection lives under a single key as a JSON array. Writes
//! always replace the full value.

pub mod memory;

pub use memory::MemoryStore;

use tracing::{debug, warn};

use crate::error::TasklistError;
use crate::models::Task;

/// Key holding the serialized collection.
pub const TASKS_KEY: &str = "tasks";

/// A string-keyed store of string values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, TasklistError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), TasklistError>;
}

/// Loads and saves the task collection through a [`KeyValueStore`].
#[derive(Debug)]
pub struct TaskStore<K> {
    backend: K,
}

impl<K: KeyValueStore> TaskStore<K> {
    pub fn new(backend: K) -> Self {
        Self { backend }
    }

    /// Read the stored collection. A missing key yields an empty collection.
    pub fn load(&self) -> Result<Vec<Task>, TasklistError> {
        let Some(raw) = self.backend.get(TASKS_KEY)? else {
            debug!("no stored tasks, starting empty");
            return Ok(Vec::new());
        };
        let mut tasks: Vec<Task> = serde_json::from_str(&raw).map_err(|e| {
            warn!(error = %e, "stored tasks are malformed");
            TasklistError::malformed_load_data(format!("Stored tasks could not be read: {e}"))
        })?;
        ensure_unique_ids(&mut tasks);
        debug!(count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    pub fn save(&mut self, tasks: &[Task]) -> Result<(), TasklistError> {
        let raw = serde_json::to_string(tasks)
            .map_err(|e| TasklistError::persistence(e.to_string()))?;
        self.backend.set(TASKS_KEY, &raw)?;
        debug!(count = tasks.len(), bytes = raw.len(), "saved tasks");
        Ok(())
    }

    pub fn backend(&self) -> &K {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut K {
        &mut self.backend
    }
}

/// Hand-edited or legacy data can repeat ids; later duplicates get new ones.
fn ensure_unique_ids(tasks: &mut [Task]) {
    let mut seen = std::collections::HashSet::new();
    for task in tasks.iter_mut() {
        if !seen.insert(task.id.clone()) {
            task.id = crate::models::new_task_id();
            seen.insert(task.id.clone());
        }
    }
}
