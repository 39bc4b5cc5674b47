use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{default_config_path, ensure_parent_dir};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSection {
    /// IANA timezone used to decide what "today" is.
    pub timezone: String,

    /// Energy level assumed when `--energy` is not given.
    pub energy: String,

    /// Availability used when no `--slot` is given ("HH:MM-HH:MM").
    pub slots: Vec<String>,

    /// Task export to plan from (.json or .csv). Defaults to ~/.lifebalance/tasks.json.
    pub tasks_file: Option<String>,
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            energy: "medium".to_string(),
            slots: vec!["09:00-12:00".to_string(), "15:00-18:00".to_string()],
            tasks_file: None,
        }
    }
}

/// `--config` if given, else the default location.
pub fn config_path(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => default_config_path(),
    }
}

/// Load `path`, or the default config file. A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = config_path(path)?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Created(PathBuf),
    AlreadyExists(PathBuf),
}

/// Write a default config to `path` (or the default location) unless one is there.
pub fn init_config(path: Option<&Path>) -> Result<InitOutcome> {
    let p = config_path(path)?;
    if p.exists() {
        return Ok(InitOutcome::AlreadyExists(p));
    }
    ensure_parent_dir(&p)?;
    save_config(&Config::default(), &p)?;
    Ok(InitOutcome::Created(p))
}
