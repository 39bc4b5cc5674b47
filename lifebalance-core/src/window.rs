//! Availability windows ("slots"): wall-clock blocks within one day.

use anyhow::{Result, anyhow, bail};
use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Convenience for `"HH:MM"` pairs; returns `None` for bad times.
    pub fn from_hm(start: &str, end: &str) -> Option<Self> {
        let start = NaiveTime::parse_from_str(start.trim(), "%H:%M").ok()?;
        let end = NaiveTime::parse_from_str(end.trim(), "%H:%M").ok()?;
        Some(Self { start, end })
    }

    /// Parse a single `"HH:MM-HH:MM"` slot string.
    pub fn parse(slot: &str) -> Result<Self> {
        let slot_re = Regex::new(concat!(
            r"^\s*(?P<sh>\d{1,2}):(?P<sm>\d{2})\s*",
            r"-\s*(?P<eh>\d{1,2}):(?P<em>\d{2})\s*$"
        ))?;

        let caps = slot_re
            .captures(slot)
            .ok_or_else(|| anyhow!("'{slot}' is not in HH:MM-HH:MM form"))?;

        let time = |h: &str, m: &str| -> Result<NaiveTime> {
            let h: u32 = h.parse()?;
            let m: u32 = m.parse()?;
            NaiveTime::from_hms_opt(h, m, 0)
                .ok_or_else(|| anyhow!("'{slot}' has an out-of-range time {h:02}:{m:02}"))
        };

        let window = Self {
            start: time(&caps["sh"], &caps["sm"])?,
            end: time(&caps["eh"], &caps["em"])?,
        };

        if !window.is_valid() {
            bail!("'{slot}' must end after it starts");
        }

        Ok(window)
    }

    /// `end - start` in minutes; zero or negative for unusable windows.
    pub fn minutes(&self) -> i64 {
        minutes_from_midnight(self.end) - minutes_from_midnight(self.start)
    }

    pub fn is_valid(&self) -> bool {
        self.minutes() > 0
    }

    /// `"HH:MM-HH:MM"`
    pub fn label(&self) -> String {
        format!("{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

pub fn minutes_from_midnight(time: NaiveTime) -> i64 {
    (time.hour() as i64) * 60 + (time.minute() as i64)
}

/// Validate a whole batch of slot strings.
///
/// All-or-nothing: if any entry is bad, the error lists every bad entry and
/// no windows are returned.
pub fn parse_slots<S: AsRef<str>>(slots: &[S]) -> Result<Vec<TimeWindow>> {
    let mut windows = Vec::with_capacity(slots.len());
    let mut problems = Vec::new();

    for slot in slots {
        match TimeWindow::parse(slot.as_ref()) {
            Ok(w) => windows.push(w),
            Err(e) => problems.push(e.to_string()),
        }
    }

    if !problems.is_empty() {
        bail!(
            "invalid availability slot(s) ({} of {}): {}",
            problems.len(),
            slots.len(),
            problems.join("; ")
        );
    }

    Ok(windows)
}
