use serde_json::json;

use crate::cli::session::Session;
use crate::cli::{parse_priority_filter, parse_sort, parse_status_filter, Context, ViewArgs};
use crate::controller::Intent;
use crate::error::TasklistError;
use crate::models::ViewQuery;
use crate::output;
use crate::view;

pub fn run_list(ctx: &Context, args: &ViewArgs) -> Result<i32, TasklistError> {
    let intents = view_intents(args)?;
    let mut session = Session::open(ctx)?;
    for intent in intents {
        session.apply(intent)?;
    }
    print_view(ctx, &session);
    Ok(0)
}

pub fn run_view(ctx: &Context, args: &ViewArgs, reset: bool) -> Result<i32, TasklistError> {
    let intents = view_intents(args)?;
    let mut session = Session::open(ctx)?;
    if reset {
        let defaults = ViewQuery::default();
        session.apply(Intent::Search(defaults.search))?;
        session.apply(Intent::FilterStatus(defaults.status))?;
        session.apply(Intent::FilterPriority(defaults.priority))?;
        session.apply(Intent::Sort(defaults.sort))?;
    }
    for intent in intents {
        session.apply(intent)?;
    }

    session.config.view = session.controller.query().clone();
    session.config.save(&ctx.data_dir)?;
    tracing::debug!(view = ?session.config.view, "saved view settings");

    print_view(ctx, &session);
    Ok(0)
}

/// Translate command-line overrides into view intents.
fn view_intents(args: &ViewArgs) -> Result<Vec<Intent>, TasklistError> {
    let mut intents = Vec::new();
    if let Some(search) = &args.search {
        intents.push(Intent::Search(search.clone()));
    }
    if let Some(status) = &args.status {
        intents.push(Intent::FilterStatus(parse_status_filter(status)?));
    }
    if let Some(priority) = &args.priority {
        intents.push(Intent::FilterPriority(parse_priority_filter(priority)?));
    }
    if let Some(sort) = &args.sort {
        intents.push(Intent::Sort(parse_sort(sort)?));
    }
    Ok(intents)
}

fn print_view(ctx: &Context, session: &Session) {
    let rows = session.controller.view();
    let query = session.controller.query();
    let summary = view::summarize(session.controller.repository().tasks());

    if ctx.json {
        let rows_json: Vec<_> = rows.iter().map(output::json::row_json).collect();
        output::json::print(&output::json::success_with_notices(
            json!({
                "view": output::json::query_json(query),
                "tasks": rows_json,
                "summary": output::json::summary_json(&summary)
            }),
            session.notices(),
        ));
    } else {
        output::text::print_notices(session.notices());
        output::text::print_query(query);
        output::text::print_rows(&rows);
        output::text::print_summary(&summary, rows.len());
    }
}
