use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_DATA_DIR;

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "tasklist",
    version = VERSION,
    about = "Personal task list manager",
    after_help = "\
NOTE:
  Data is stored in <data-dir>/tasklist.db (default ./.tasklist).
  Run `tasklist init` before any other command.
  Task ids accept any unique prefix.

EXIT CODES:
  0  Success
  1  Error (not initialized, unknown task, validation, storage, etc.)

VIEW:
  `list` shows tasks filtered by title search, status and priority, sorted by
  creation date (default) or priority. Ties keep the manual order set by `move`.
  `view` saves the search/filter/sort used by `list` when no flags are given."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the database and config
    #[arg(long, global = true, env = "TASKLIST_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the data directory
    Init,

    /// Add a task (status starts as pending)
    Add {
        /// Task title
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        category: String,
        /// high, medium or low
        #[arg(long, default_value = "medium")]
        priority: String,
    },

    /// Edit a task; omitted fields keep their values
    Edit {
        /// Task ID or prefix
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },

    /// Delete a task
    Delete {
        /// Task ID or prefix
        id: String,
    },

    /// Flip a task between pending and completed
    Toggle {
        /// Task ID or prefix
        id: String,
    },

    /// Show task details
    Show {
        /// Task ID or prefix
        id: String,
    },

    /// Reorder a task
    #[command(after_help = "\
NOTE:
  --onto <id>: the task takes the other task's place (drag-and-drop).
  --to <n>:    the task is removed, then inserted at 0-based position n of the
               remaining list. Positions count all tasks, not only listed ones.")]
    Move {
        /// Task ID or prefix
        id: String,
        /// Drop onto this task
        #[arg(long, conflicts_with = "to", required_unless_present = "to")]
        onto: Option<String>,
        /// Target position in the full list
        #[arg(long)]
        to: Option<usize>,
    },

    /// List tasks through the saved view, with optional overrides
    List(ViewArgs),

    /// Change the saved view settings
    View {
        #[command(flatten)]
        args: ViewArgs,
        /// Restore the default view before applying flags
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct ViewArgs {
    /// Case-insensitive title search
    #[arg(long)]
    pub search: Option<String>,
    /// all, pending or completed
    #[arg(long)]
    pub status: Option<String>,
    /// all, high, medium or low
    #[arg(long)]
    pub priority: Option<String>,
    /// date or priority
    #[arg(long)]
    pub sort: Option<String>,
}
