use crate::cli::Context;
use crate::config::Config;
use crate::controller::{Controller, Intent, Outcome, RecordingNotifier};
use crate::db::SqliteStore;
use crate::error::TasklistError;
use crate::models::Task;

/// One CLI invocation's view of the task list.
pub struct Session {
    pub controller: Controller<SqliteStore, RecordingNotifier>,
    pub config: Config,
}

impl Session {
    pub fn open(ctx: &Context) -> Result<Self, TasklistError> {
        let store = SqliteStore::open(&ctx.data_dir)?;
        let config = Config::load(&ctx.data_dir)?;
        let controller =
            Controller::start(store, RecordingNotifier::default(), config.view.clone())?;
        Ok(Self { controller, config })
    }

    pub fn resolve(&self, reference: &str) -> Result<Task, TasklistError> {
        self.controller.repository().resolve(reference).cloned()
    }

    /// Dispatch an intent and turn anything but success into an error.
    pub fn apply(&mut self, intent: Intent) -> Result<(), TasklistError> {
        let target = match &intent {
            Intent::Edit { id, .. }
            | Intent::Delete { id }
            | Intent::Toggle { id }
            | Intent::Move { id, .. }
            | Intent::MoveTo { id, .. } => id.clone(),
            _ => String::new(),
        };
        match self.controller.dispatch(intent) {
            Outcome::Applied => Ok(()),
            Outcome::Ignored => Err(TasklistError::task_not_found(&target)),
            Outcome::Failed(code) => {
                let message = self.notices().last().cloned().unwrap_or_default();
                Err(TasklistError::new(code, message))
            }
        }
    }

    pub fn notices(&self) -> &[String] {
        &self.controller.notifier().messages
    }
}
