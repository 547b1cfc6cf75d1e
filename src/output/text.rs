use crate::models::{SortKey, Summary, Task, TaskStatus, ViewQuery, ViewRow};

pub fn print_task(t: &Task, position: usize) {
    println!("Task: {} ({})", t.title, t.id);
    if !t.description.is_empty() {
        println!("  Description: {}", t.description);
    }
    if !t.category.is_empty() {
        println!("  Category: {}", t.category);
    }
    println!("  Priority: {}", t.priority.as_str());
    println!("  Status: {}", t.status.as_str());
    println!("  Created: {}", t.date.format("%Y-%m-%d %H:%M:%S"));
    println!("  Position: {position}");
}

pub fn print_rows(rows: &[ViewRow]) {
    if rows.is_empty() {
        println!("No tasks found.");
        return;
    }
    for r in rows {
        let t = &r.task;
        let mark = if t.status == TaskStatus::Completed { "x" } else { " " };
        let category = if t.category.is_empty() {
            String::new()
        } else {
            format!(" #{}", t.category)
        };
        println!(
            "  [{mark}] {} ({}) {}{category}",
            t.title,
            short_id(&t.id),
            t.priority.as_str(),
        );
    }
}

/// First eight characters of an id. Stored ids are not guaranteed ASCII.
fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

pub fn print_query(q: &ViewQuery) {
    if !q.is_filtered() && q.sort == SortKey::Date {
        return;
    }
    let search = if q.search.is_empty() {
        String::new()
    } else {
        format!(" search=\"{}\"", q.search)
    };
    println!(
        "View:{search} status={} priority={} sort={}",
        q.status.as_str(),
        q.priority.as_str(),
        q.sort.as_str()
    );
}

pub fn print_summary(s: &Summary, shown: usize) {
    println!(
        "Showing {shown} of {} (pending={} completed={})",
        s.total, s.pending, s.completed
    );
}

pub fn print_notices(notices: &[String]) {
    for n in notices {
        println!("{n}");
    }
}
