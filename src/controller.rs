//! Routes user intents to the repository and reports back through a
//! notification sink. Nothing here returns an error to the caller: every
//! failure becomes a notification or a silent no-op.

use tracing::{debug, warn};

use crate::error::{ErrorCode, TasklistError};
use crate::models::{PriorityFilter, SortKey, StatusFilter, TaskFields, ViewQuery, ViewRow};
use crate::repository::Repository;
use crate::store::KeyValueStore;
use crate::view;

/// A discrete user action. Tasks are addressed by id, never by position
/// in a rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add(TaskFields),
    Edit { id: String, fields: TaskFields },
    Delete { id: String },
    Toggle { id: String },
    /// Drop `id` onto the task `target`.
    Move { id: String, target: String },
    MoveTo { id: String, position: usize },
    FilterStatus(StatusFilter),
    FilterPriority(PriorityFilter),
    Search(String),
    Sort(SortKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The intent referred to a task that no longer exists.
    Ignored,
    /// The failure was reported to the notifier. For `PersistenceError` the
    /// change is live in memory but not saved.
    Failed(ErrorCode),
}

/// Fire-and-forget sink for short user-facing messages.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Keeps notifications for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub messages: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

pub struct Controller<K, N> {
    repository: Repository<K>,
    notifier: N,
    query: ViewQuery,
}

impl<K: KeyValueStore, N: Notifier> Controller<K, N> {
    pub fn new(repository: Repository<K>, notifier: N, query: ViewQuery) -> Self {
        Self {
            repository,
            notifier,
            query,
        }
    }

    /// Load the repository from `backend`, telling the user when stored
    /// data had to be discarded. Fails only when the backend itself cannot
    /// be read.
    pub fn start(backend: K, mut notifier: N, query: ViewQuery) -> Result<Self, TasklistError> {
        let (repository, load_error) = Repository::init(backend)?;
        if let Some(e) = load_error {
            notifier.notify(&format!("Saved tasks could not be loaded, starting empty. ({e})"));
        }
        Ok(Self::new(repository, notifier, query))
    }

    pub fn dispatch(&mut self, intent: Intent) -> Outcome {
        debug!(?intent, "dispatch");
        match self.apply(intent) {
            Ok(Some(message)) => {
                self.notifier.notify(message);
                Outcome::Applied
            }
            Ok(None) => Outcome::Applied,
            Err(e) if e.code.is_stale_reference() => {
                debug!(error = %e, "ignoring intent for a stale task reference");
                Outcome::Ignored
            }
            Err(e) => {
                warn!(code = e.code.as_str(), error = %e, "intent failed");
                self.notifier.notify(&failure_message(&e));
                Outcome::Failed(e.code)
            }
        }
    }

    /// Rows to display for the current query.
    pub fn view(&self) -> Vec<ViewRow> {
        view::project(self.repository.tasks(), &self.query)
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn repository(&self) -> &Repository<K> {
        &self.repository
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn into_parts(self) -> (Repository<K>, N, ViewQuery) {
        (self.repository, self.notifier, self.query)
    }

    fn apply(&mut self, intent: Intent) -> Result<Option<&'static str>, TasklistError> {
        let repo = &mut self.repository;
        match intent {
            Intent::Add(fields) => {
                repo.add(fields)?;
                Ok(Some("Task added!"))
            }
            Intent::Edit { id, fields } => {
                repo.update(&id, fields)?;
                Ok(Some("Task updated!"))
            }
            Intent::Delete { id } => {
                repo.remove(&id)?;
                Ok(Some("Task deleted!"))
            }
            Intent::Toggle { id } => {
                repo.toggle_status(&id)?;
                Ok(None)
            }
            Intent::Move { id, target } => {
                repo.move_onto(&id, &target)?;
                Ok(None)
            }
            Intent::MoveTo { id, position } => {
                repo.move_task(&id, position)?;
                Ok(None)
            }
            Intent::FilterStatus(status) => {
                self.query.status = status;
                Ok(None)
            }
            Intent::FilterPriority(priority) => {
                self.query.priority = priority;
                Ok(None)
            }
            Intent::Search(search) => {
                self.query.search = search;
                Ok(None)
            }
            Intent::Sort(sort) => {
                self.query.sort = sort;
                Ok(None)
            }
        }
    }
}

fn failure_message(e: &TasklistError) -> String {
    match e.code {
        ErrorCode::PersistenceError => format!("Could not save tasks: {}", e.message),
        _ => e.message.clone(),
    }
}
