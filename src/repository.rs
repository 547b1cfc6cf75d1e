//! The authoritative, ordered task collection.
//!
//! Order is the user's manual order. Every mutation is written through to
//! the store before returning; a failed write leaves the in-memory change in
//! place and is reported as a persistence error.

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{ErrorCode, TasklistError};
use crate::models::{Task, TaskFields};
use crate::store::{KeyValueStore, TaskStore};

#[derive(Debug)]
pub struct Repository<K> {
    tasks: Vec<Task>,
    store: TaskStore<K>,
}

impl<K: KeyValueStore> Repository<K> {
    /// Load the collection. Malformed stored data falls back to an empty
    /// list and the load error is handed back so the caller can tell the
    /// user. A backend that cannot be read at all is an error: starting
    /// empty there would overwrite the stored tasks on the next save.
    pub fn init(backend: K) -> Result<(Self, Option<TasklistError>), TasklistError> {
        let store = TaskStore::new(backend);
        match store.load() {
            Ok(tasks) => Ok((Self { tasks, store }, None)),
            Err(e) if e.code == ErrorCode::MalformedLoadData => {
                warn!(code = e.code.as_str(), error = %e, "starting with an empty task list");
                Ok((Self { tasks: Vec::new(), store }, Some(e)))
            }
            Err(e) => Err(e),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn store(&self) -> &TaskStore<K> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore<K> {
        &mut self.store
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Resolve a task reference: exact id, then unique id prefix compared
    /// without regard to ASCII case.
    pub fn resolve(&self, reference: &str) -> Result<&Task, TasklistError> {
        if let Some(task) = self.get(reference) {
            return Ok(task);
        }
        let prefix = reference.to_ascii_uppercase();
        if prefix.is_empty() {
            return Err(TasklistError::task_not_found(reference));
        }
        let matches: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.id.to_ascii_uppercase().starts_with(&prefix))
            .collect();
        match matches.as_slice() {
            [] => Err(TasklistError::task_not_found(reference)),
            [task] => Ok(task),
            _ => {
                let candidates: Vec<String> =
                    matches.iter().map(|t| format!("{} ({})", t.title, t.id)).collect();
                Err(TasklistError::ambiguous_ref(reference, &candidates))
            }
        }
    }

    /// Append a new pending task stamped with the current time.
    pub fn add(&mut self, fields: TaskFields) -> Result<&Task, TasklistError> {
        validate(&fields)?;
        let task = Task::create(fields, Utc::now());
        debug!(id = %task.id, title = %task.title, "add task");
        self.tasks.push(task);
        self.persist()?;
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    pub fn remove_at(&mut self, position: usize) -> Result<Task, TasklistError> {
        self.check_position(position)?;
        let removed = self.tasks.remove(position);
        debug!(id = %removed.id, position, "remove task");
        self.persist()?;
        Ok(removed)
    }

    pub fn update_at(&mut self, position: usize, fields: TaskFields) -> Result<(), TasklistError> {
        self.check_position(position)?;
        validate(&fields)?;
        let task = &mut self.tasks[position];
        task.apply(fields);
        debug!(id = %task.id, position, "update task");
        self.persist()
    }

    pub fn toggle_status_at(&mut self, position: usize) -> Result<(), TasklistError> {
        self.check_position(position)?;
        let task = &mut self.tasks[position];
        task.status = task.status.toggled();
        debug!(id = %task.id, position, status = task.status.as_str(), "toggle task");
        self.persist()
    }

    /// Splice the task at `from` out, then back in at `to`. `to` indexes the
    /// sequence after the removal, so `[A,B,C,D]` with `move_to(0, 2)`
    /// becomes `[B,C,A,D]`.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<(), TasklistError> {
        self.check_position(from)?;
        self.check_position(to)?;
        if from == to {
            return Ok(());
        }
        let task = self.tasks.remove(from);
        debug!(id = %task.id, from, to, "move task");
        self.tasks.insert(to, task);
        self.persist()
    }

    pub fn remove(&mut self, id: &str) -> Result<Task, TasklistError> {
        let position = self.require(id)?;
        self.remove_at(position)
    }

    pub fn update(&mut self, id: &str, fields: TaskFields) -> Result<(), TasklistError> {
        let position = self.require(id)?;
        self.update_at(position, fields)
    }

    pub fn toggle_status(&mut self, id: &str) -> Result<(), TasklistError> {
        let position = self.require(id)?;
        self.toggle_status_at(position)
    }

    pub fn move_task(&mut self, id: &str, to: usize) -> Result<(), TasklistError> {
        let from = self.require(id)?;
        self.move_to(from, to)
    }

    /// Drop `id` onto `target`: the task takes the target's current place.
    pub fn move_onto(&mut self, id: &str, target: &str) -> Result<(), TasklistError> {
        let from = self.require(id)?;
        let to = self.require(target)?;
        self.move_to(from, to)
    }

    fn require(&self, id: &str) -> Result<usize, TasklistError> {
        self.position_of(id)
            .ok_or_else(|| TasklistError::task_not_found(id))
    }

    fn check_position(&self, position: usize) -> Result<(), TasklistError> {
        if position >= self.tasks.len() {
            return Err(TasklistError::index_out_of_range(position, self.tasks.len()));
        }
        Ok(())
    }

    fn persist(&mut self) -> Result<(), TasklistError> {
        self.store.save(&self.tasks).map_err(|e| {
            warn!(error = %e, "failed to persist tasks; keeping in-memory state");
            e
        })
    }
}

fn validate(fields: &TaskFields) -> Result<(), TasklistError> {
    if fields.title.trim().is_empty() {
        return Err(TasklistError::validation("Task title must not be empty"));
    }
    Ok(())
}
