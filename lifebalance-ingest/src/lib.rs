//! lifebalance-ingest: load task lists exported by the task store (JSON) or
//! kept as spreadsheets (CSV).

pub mod parsers;
pub mod types;

pub use types::{StoredTask, TaskFileFormat};

use anyhow::{Context, Result, bail};
use lifebalance_core::Task;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read every task record in a file, completed ones included.
pub fn load_stored_tasks(path: impl AsRef<Path>) -> Result<Vec<StoredTask>> {
    let path = path.as_ref();
    let Some(format) = TaskFileFormat::from_path(path) else {
        bail!(
            "unsupported task file {} (expected .json or .csv)",
            path.display()
        );
    };

    let tasks = match format {
        TaskFileFormat::Json => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            parsers::parse_tasks_json(&text)
        }
        TaskFileFormat::Csv => {
            let file =
                fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
            parsers::parse_tasks_csv(file)
        }
    }
    .with_context(|| format!("parsing {}", path.display()))?;

    debug!(path = %path.display(), ?format, records = tasks.len(), "loaded task file");
    Ok(tasks)
}

/// Tasks still to do, in file order. These are what the planner sees.
pub fn load_pending_tasks(path: impl AsRef<Path>) -> Result<Vec<Task>> {
    Ok(pending(load_stored_tasks(path)?))
}

pub fn pending(stored: Vec<StoredTask>) -> Vec<Task> {
    stored
        .into_iter()
        .filter(|t| !t.completed)
        .map(|t| t.task)
        .collect()
}
