//! Boundary adapter from the backend's task payloads to canonical [`Task`]s.
//!
//! The goal-generation endpoints and the issue listing each return their own
//! JSON layout. Everything downstream only ever sees `Vec<Task>`.

use crate::error::{Result, WorkplanError};
use crate::task::{Task, TaskId};
use serde_json::Value;

const UNTITLED_TASK: &str = "Untitled task";
const UNTITLED_SUBTASK: &str = "Untitled subtask";

/// Parse and normalize a JSON document.
pub fn normalize_str(json: &str) -> Result<Vec<Task>> {
    let value: Value = serde_json::from_str(json)?;
    normalize(&value)
}

/// Normalize any of the recognized payload shapes, sorted by ascending id.
///
/// - a bare array of goals
/// - `{ "big_goals": { "goals": [...] } }`
/// - `{ "tasks": [...] }`, a flat issue list linked by `parent_id`
/// - `{ "goals": [...] }`
pub fn normalize(value: &Value) -> Result<Vec<Task>> {
    let mut tasks = if let Some(items) = value.as_array() {
        goal_list(items, "$")?
    } else if let Some(items) = value
        .pointer("/big_goals/goals")
        .and_then(Value::as_array)
    {
        goal_list(items, "$.big_goals.goals")?
    } else if let Some(items) = value.get("tasks").and_then(Value::as_array) {
        issue_list(items)?
    } else if let Some(items) = value.get("goals").and_then(Value::as_array) {
        goal_list(items, "$.goals")?
    } else {
        return Err(WorkplanError::UnrecognizedTaskShape(describe(value)));
    };

    tasks.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(tasks)
}

fn describe(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("object with keys [{}]", keys.join(", "))
        }
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(_) => "array".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Goal lists
// ---------------------------------------------------------------------------

fn goal_list(items: &[Value], path: &str) -> Result<Vec<Task>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| goal(item, &format!("{path}[{i}]"), UNTITLED_TASK, true))
        .collect()
}

fn goal(item: &Value, path: &str, untitled: &str, with_children: bool) -> Result<Task> {
    let id = id_field(item, "id", path)?;
    let title = text(item, "title")
        .filter(|t| !t.is_empty())
        .unwrap_or(untitled);

    let mut task = Task::new(id, title);
    task.description = text(item, "description")
        .filter(|d| !d.is_empty())
        .map(String::from);
    task.estimated_hours = item
        .get("estimatedHours")
        .or_else(|| item.get("estimated_hours"))
        .and_then(hours);

    if with_children {
        let children = item
            .get("sub_tasks")
            .or_else(|| item.get("subTasks"))
            .and_then(Value::as_array);
        if let Some(children) = children {
            task.sub_tasks = children
                .iter()
                .enumerate()
                .map(|(i, child)| {
                    goal(child, &format!("{path}.sub_tasks[{i}]"), UNTITLED_SUBTASK, false)
                })
                .collect::<Result<_>>()?;
        }
    }
    Ok(task)
}

// ---------------------------------------------------------------------------
// Issue lists
// ---------------------------------------------------------------------------

fn issue_list(items: &[Value]) -> Result<Vec<Task>> {
    let mut parents: Vec<Task> = Vec::new();
    let mut children: Vec<(TaskId, Task)> = Vec::new();

    for (i, item) in items.iter().enumerate() {
        let path = format!("$.tasks[{i}]");
        let is_parent = item.get("is_parent").and_then(Value::as_bool).unwrap_or(false);
        let parent_id = match item.get("parent_id") {
            None | Some(Value::Null) => None,
            Some(v) => Some(parse_id(v, &format!("{path}.parent_id"))?),
        };

        match (is_parent, parent_id) {
            (true, None) => parents.push(issue(item, &path, UNTITLED_TASK)?),
            (false, Some(parent)) => children.push((parent, issue(item, &path, UNTITLED_SUBTASK)?)),
            _ => {
                tracing::warn!(entry = %path, "skipping issue that is neither a parent nor a child")
            }
        }
    }

    for (parent_id, child) in children {
        match parents.iter_mut().find(|p| p.id == parent_id) {
            Some(parent) => parent.sub_tasks.push(child),
            None => tracing::warn!(
                sub_task = %child.id,
                parent = %parent_id,
                "dropping sub-task whose parent is not in the list"
            ),
        }
    }

    Ok(parents)
}

fn issue(item: &Value, path: &str, untitled: &str) -> Result<Task> {
    let id = id_field(item, "number", path)?;
    let title = text(item, "title")
        .filter(|t| !t.is_empty())
        .unwrap_or(untitled);
    let mut task = Task::new(id, title);
    task.description = text(item, "body")
        .filter(|b| !b.is_empty())
        .map(String::from);
    Ok(task)
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn id_field(item: &Value, key: &str, path: &str) -> Result<TaskId> {
    match item.get(key) {
        None | Some(Value::Null) => Err(WorkplanError::MissingTaskId(path.to_string())),
        Some(v) => parse_id(v, path),
    }
}

fn parse_id(value: &Value, path: &str) -> Result<TaskId> {
    let id: TaskId = serde_json::from_value(value.clone())
        .map_err(|e| WorkplanError::InvalidTask(format!("{path}: {e}")))?;
    if id.is_empty() {
        return Err(WorkplanError::MissingTaskId(path.to_string()));
    }
    Ok(id)
}

fn text<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key).and_then(Value::as_str)
}

fn hours(value: &Value) -> Option<f64> {
    let parsed: Option<f64> = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|h| h.is_finite())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
