//! On-disk locations. `LIFEBALANCE_HOME` relocates everything; otherwise files
//! live under `~/.lifebalance`.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const HOME_OVERRIDE: &str = "LIFEBALANCE_HOME";

pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_OVERRIDE).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .with_context(|| format!("neither {HOME_OVERRIDE} nor HOME is set"))?;
    Ok(PathBuf::from(home).join(".lifebalance"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("config.toml"))
}

/// Where the task store's export is read from unless told otherwise.
pub fn default_tasks_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("tasks.json"))
}

/// Create whatever directories `file` needs before it can be written.
pub fn ensure_parent_dir(file: &Path) -> Result<()> {
    match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))
        }
        _ => Ok(()),
    }
}
