//! JSON task exports.
//!
//! Accepted shapes:
//!   [ {"name": "...", ...}, ... ]
//!   { "tasks": [ {"name": "...", ...}, ... ] }

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::types::StoredTask;

#[derive(Deserialize)]
#[serde(untagged)]
enum TaskDocument {
    List(Vec<StoredTask>),
    Wrapped { tasks: Vec<StoredTask> },
}

pub fn parse_tasks_json(text: &str) -> Result<Vec<StoredTask>> {
    let doc: TaskDocument =
        serde_json::from_str(text).context("expected a task array or {\"tasks\": [...]}")?;

    Ok(match doc {
        TaskDocument::List(tasks) => tasks,
        TaskDocument::Wrapped { tasks } => tasks,
    })
}
