pub mod commands;
pub mod init;
pub mod session;
pub mod task;
pub mod view;

pub use commands::*;

use std::path::PathBuf;

use crate::error::TasklistError;
use crate::models::{Priority, PriorityFilter, SortKey, StatusFilter};
use crate::output;

/// Global flags shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub json: bool,
    pub data_dir: PathBuf,
}

pub fn run(cli: Cli) -> i32 {
    let ctx = Context {
        json: cli.json,
        data_dir: cli.data_dir,
    };
    let result = match cli.command {
        Commands::Init => init::run(&ctx),
        Commands::Add { title, description, category, priority } => {
            task::run_add(&ctx, &title, &description, &category, &priority)
        }
        Commands::Edit { id, title, description, category, priority } => {
            task::run_edit(&ctx, &id, title, description, category, priority.as_deref())
        }
        Commands::Delete { id } => task::run_delete(&ctx, &id),
        Commands::Toggle { id } => task::run_toggle(&ctx, &id),
        Commands::Show { id } => task::run_show(&ctx, &id),
        Commands::Move { id, onto, to } => task::run_move(&ctx, &id, onto.as_deref(), to),
        Commands::List(args) => view::run_list(&ctx, &args),
        Commands::View { args, reset } => view::run_view(&ctx, &args, reset),
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            report_error(&ctx, &e);
            1
        }
    }
}

pub fn report_error(ctx: &Context, e: &TasklistError) {
    if ctx.json {
        output::json::print(&output::json::error(e));
    } else {
        eprintln!("Error: {}", e.message);
    }
}

pub fn parse_priority(s: &str) -> Result<Priority, TasklistError> {
    Priority::from_str(s).ok_or_else(|| {
        TasklistError::validation(format!(
            "Invalid priority '{s}' (expected high, medium or low)"
        ))
    })
}

pub fn parse_status_filter(s: &str) -> Result<StatusFilter, TasklistError> {
    StatusFilter::from_str(s).ok_or_else(|| {
        TasklistError::validation(format!(
            "Invalid status filter '{s}' (expected all, pending or completed)"
        ))
    })
}

pub fn parse_priority_filter(s: &str) -> Result<PriorityFilter, TasklistError> {
    PriorityFilter::from_str(s).ok_or_else(|| {
        TasklistError::validation(format!(
            "Invalid priority filter '{s}' (expected all, high, medium or low)"
        ))
    })
}

pub fn parse_sort(s: &str) -> Result<SortKey, TasklistError> {
    SortKey::from_str(s).ok_or_else(|| {
        TasklistError::validation(format!("Invalid sort '{s}' (expected date or priority)"))
    })
}
