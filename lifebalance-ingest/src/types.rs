use lifebalance_core::Task;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskFileFormat {
    Json,
    Csv,
}

impl TaskFileFormat {
    /// Pick a format from the file extension (`.json`, `.csv`, any case).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(TaskFileFormat::Json),
            "csv" => Some(TaskFileFormat::Csv),
            _ => None,
        }
    }
}

/// A task record as exported by the task store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTask {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(flatten)]
    pub task: Task,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub created_at: Option<String>,
}

impl StoredTask {
    pub fn pending(task: Task) -> Self {
        Self {
            id: None,
            task,
            completed: false,
            created_at: None,
        }
    }
}
