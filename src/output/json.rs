use serde_json::{json, Value};

use crate::error::TasklistError;
use crate::models::{Summary, Task, ViewQuery, ViewRow};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn success_with_notices(data: Value, notices: &[String]) -> Value {
    let mut v = success(data);
    if !notices.is_empty() {
        v["notices"] = json!(notices);
    }
    v
}

pub fn error(err: &TasklistError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn print(v: &Value) {
    match serde_json::to_string_pretty(v) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Error: {e}"),
    }
}

pub fn task_json(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "description": t.description,
        "category": t.category,
        "priority": t.priority.as_str(),
        "status": t.status.as_str(),
        "date": t.date.to_rfc3339()
    })
}

pub fn row_json(r: &ViewRow) -> Value {
    let mut v = task_json(&r.task);
    v["position"] = json!(r.position);
    v
}

pub fn query_json(q: &ViewQuery) -> Value {
    json!({
        "search": q.search,
        "status": q.status.as_str(),
        "priority": q.priority.as_str(),
        "sort": q.sort.as_str()
    })
}

pub fn summary_json(s: &Summary) -> Value {
    json!({
        "total": s.total,
        "pending": s.pending,
        "completed": s.completed
    })
}
