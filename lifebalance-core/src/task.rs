//! Task model: the loose record callers hand in, and the normalized copy the
//! planner works on.

use crate::energy::EnergyLevel;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DURATION_MINUTES: u32 = 30;
pub const DEFAULT_PRIORITY: u8 = 3;
pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 5;
pub const DEFAULT_CATEGORY: &str = "study";

/// A task as the store hands it over. Any field but `name` may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Task {
    pub name: String,

    /// Display grouping only (study/work/health/...).
    #[serde(default)]
    pub category: Option<String>,

    /// Requested minutes.
    #[serde(default)]
    pub duration: Option<i64>,

    /// "high" | "medium" | "low", any case.
    #[serde(default)]
    pub energy_required: Option<String>,

    /// 1 (low) ..= 5 (high).
    #[serde(default)]
    pub priority: Option<i64>,

    /// ISO date, `YYYY-MM-DD`.
    #[serde(default)]
    pub deadline: Option<String>,
}

impl Task {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.duration = Some(minutes);
        self
    }

    pub fn with_energy(mut self, energy: impl Into<String>) -> Self {
        self.energy_required = Some(energy.into());
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    /// Build the fully populated planning record for this task.
    ///
    /// `index` is the task's position in the caller's list; `today` is the
    /// reference date for overdue/due-today checks.
    pub fn normalize(&self, index: usize, today: NaiveDate) -> PlannedTask {
        let duration = match self.duration {
            Some(m) if m > 0 => u32::try_from(m).unwrap_or(u32::MAX),
            _ => DEFAULT_DURATION_MINUTES,
        };

        let priority = self
            .priority
            .map(|p| p.clamp(MIN_PRIORITY as i64, MAX_PRIORITY as i64) as u8)
            .unwrap_or(DEFAULT_PRIORITY);

        let energy = self
            .energy_required
            .as_deref()
            .map(EnergyLevel::parse_lenient)
            .unwrap_or_default();

        let parsed = self.deadline.as_deref().and_then(parse_deadline);
        let deadline = parsed.unwrap_or(today);

        PlannedTask {
            index,
            name: self.name.clone(),
            category: self
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(DEFAULT_CATEGORY)
                .to_string(),
            duration,
            energy,
            priority,
            deadline,
            deadline_given: parsed.is_some(),
            is_overdue: deadline < today,
            is_today: deadline == today,
        }
    }
}

/// Normalized task for a single planning run. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTask {
    pub index: usize,
    pub name: String,
    pub category: String,

    /// Minutes, always > 0.
    pub duration: u32,

    pub energy: EnergyLevel,

    /// 1..=5.
    pub priority: u8,

    /// Falls back to the planning date when missing or unparsable.
    pub deadline: NaiveDate,

    /// False when `deadline` is the fallback.
    pub deadline_given: bool,

    pub is_overdue: bool,
    pub is_today: bool,
}

impl PlannedTask {
    pub fn energy_num(&self) -> u8 {
        self.energy.rank()
    }
}

/// Accepts `YYYY-MM-DD` or an ISO date-time, keeping only the date.
pub fn parse_deadline(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }

    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}
