//! Filtered and sorted projection of the task collection for display.

use crate::models::{SortKey, Summary, Task, TaskStatus, ViewQuery, ViewRow};

/// Project `tasks` through `query`. Each row keeps the task's id and its
/// position in `tasks`, so actions on a displayed row reach the right task
/// whatever filter or sort is active.
pub fn project(tasks: &[Task], query: &ViewQuery) -> Vec<ViewRow> {
    let needle = query.search.to_lowercase();
    let mut rows: Vec<ViewRow> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| {
            t.title.to_lowercase().contains(&needle)
                && query.status.matches(t.status)
                && query.priority.matches(t.priority)
        })
        .map(|(position, t)| ViewRow {
            position,
            task: t.clone(),
        })
        .collect();

    // sort_by_key is stable: ties keep collection order.
    match query.sort {
        SortKey::Priority => rows.sort_by_key(|r| r.task.priority.rank()),
        SortKey::Date => rows.sort_by_key(|r| r.task.date),
    }
    rows
}

pub fn summarize(tasks: &[Task]) -> Summary {
    let completed = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    Summary {
        total: tasks.len(),
        pending: tasks.len() - completed,
        completed,
    }
}
