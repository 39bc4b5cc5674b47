//! Energy levels: what a task demands and what the user has today.

use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    Low = 1,
    #[default]
    Medium = 2,
    High = 3,
}

impl EnergyLevel {
    /// Numeric energy rank: low=1, medium=2, high=3.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Parse without failing. Anything unrecognized (or empty) is `Medium`.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Whether a task needing `required` fits into a day at this level.
    pub fn admits(self, required: EnergyLevel) -> bool {
        required.rank() <= self.rank()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnergyLevel::Low => "low",
            EnergyLevel::Medium => "medium",
            EnergyLevel::High => "high",
        }
    }
}

impl FromStr for EnergyLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(EnergyLevel::High),
            "medium" => Ok(EnergyLevel::Medium),
            "low" => Ok(EnergyLevel::Low),
            other => bail!("unknown energy level '{other}' (expected high, medium or low)"),
        }
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
