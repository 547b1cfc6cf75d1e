use serde_json::json;

use crate::cli::session::Session;
use crate::cli::{parse_priority, Context};
use crate::controller::Intent;
use crate::error::TasklistError;
use crate::models::{Task, TaskFields};
use crate::output;

pub fn run_add(
    ctx: &Context,
    title: &str,
    description: &str,
    category: &str,
    priority: &str,
) -> Result<i32, TasklistError> {
    let priority = parse_priority(priority)?;
    let mut session = Session::open(ctx)?;
    let fields = TaskFields::new(title, priority)
        .description(description)
        .category(category);
    session.apply(Intent::Add(fields))?;

    let tasks = session.controller.repository().tasks();
    let task = tasks.last().ok_or_else(|| TasklistError::persistence("Task was not stored"))?;
    print_task_result(ctx, &session, "task", task, "Added task");
    Ok(0)
}

pub fn run_edit(
    ctx: &Context,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    priority: Option<&str>,
) -> Result<i32, TasklistError> {
    let priority = priority.map(parse_priority).transpose()?;
    let mut session = Session::open(ctx)?;
    let task = session.resolve(id)?;

    let mut fields = task.fields();
    if let Some(title) = title {
        fields.title = title;
    }
    if let Some(description) = description {
        fields.description = description;
    }
    if let Some(category) = category {
        fields.category = category;
    }
    if let Some(priority) = priority {
        fields.priority = priority;
    }
    session.apply(Intent::Edit {
        id: task.id.clone(),
        fields,
    })?;

    let updated = session.resolve(&task.id)?;
    print_task_result(ctx, &session, "task", &updated, "Updated task");
    Ok(0)
}

pub fn run_delete(ctx: &Context, id: &str) -> Result<i32, TasklistError> {
    let mut session = Session::open(ctx)?;
    let task = session.resolve(id)?;
    session.apply(Intent::Delete { id: task.id.clone() })?;
    print_task_result(ctx, &session, "deleted", &task, "Deleted task");
    Ok(0)
}

pub fn run_toggle(ctx: &Context, id: &str) -> Result<i32, TasklistError> {
    let mut session = Session::open(ctx)?;
    let task = session.resolve(id)?;
    session.apply(Intent::Toggle { id: task.id.clone() })?;

    let updated = session.resolve(&task.id)?;
    if ctx.json {
        output::json::print(&output::json::success_with_notices(
            json!({ "task": output::json::task_json(&updated) }),
            session.notices(),
        ));
    } else {
        output::text::print_notices(session.notices());
        println!("Task {} → {}", updated.id, updated.status.as_str());
    }
    Ok(0)
}

pub fn run_show(ctx: &Context, id: &str) -> Result<i32, TasklistError> {
    let session = Session::open(ctx)?;
    let task = session.resolve(id)?;
    let position = session
        .controller
        .repository()
        .position_of(&task.id)
        .unwrap_or_default();

    if ctx.json {
        let mut v = output::json::task_json(&task);
        v["position"] = json!(position);
        output::json::print(&output::json::success_with_notices(
            json!({ "task": v }),
            session.notices(),
        ));
    } else {
        output::text::print_notices(session.notices());
        output::text::print_task(&task, position);
    }
    Ok(0)
}

pub fn run_move(
    ctx: &Context,
    id: &str,
    onto: Option<&str>,
    to: Option<usize>,
) -> Result<i32, TasklistError> {
    let mut session = Session::open(ctx)?;
    let task = session.resolve(id)?;
    let intent = match (onto, to) {
        (Some(target), _) => {
            let target = session.resolve(target)?;
            Intent::Move {
                id: task.id.clone(),
                target: target.id,
            }
        }
        (None, Some(position)) => {
            let len = session.controller.repository().len();
            if position >= len {
                return Err(TasklistError::index_out_of_range(position, len));
            }
            Intent::MoveTo {
                id: task.id.clone(),
                position,
            }
        }
        (None, None) => return Err(TasklistError::validation("Specify --onto <id> or --to <position>")),
    };
    session.apply(intent)?;

    let repo = session.controller.repository();
    let position = repo.position_of(&task.id).unwrap_or_default();
    if ctx.json {
        let order: Vec<_> = repo.tasks().iter().map(|t| json!(t.id)).collect();
        output::json::print(&output::json::success_with_notices(
            json!({
                "moved": { "id": task.id, "position": position },
                "order": order
            }),
            session.notices(),
        ));
    } else {
        output::text::print_notices(session.notices());
        println!("Moved task {} to position {}", task.id, position);
    }
    Ok(0)
}

fn print_task_result(ctx: &Context, session: &Session, key: &str, task: &Task, verb: &str) {
    if ctx.json {
        let mut data = json!({});
        data[key] = output::json::task_json(task);
        output::json::print(&output::json::success_with_notices(data, session.notices()));
    } else {
        output::text::print_notices(session.notices());
        println!("{verb}: {} ({})", task.title, task.id);
    }
}
