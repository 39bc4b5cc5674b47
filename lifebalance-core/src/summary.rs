//! Plan outcome classification for callers that talk to a user.
//!
//! The planner only returns allocations. Whether that means "nothing to do",
//! "no free time" or "some tasks did not fit" is worked out here.

use crate::energy::EnergyLevel;
use crate::planner::Allocation;
use crate::task::Task;
use crate::window::TimeWindow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    NoTasks,
    NoWindows,
    /// Every task needs more energy than is available today.
    NothingEligible,
    /// Every eligible task was fully scheduled.
    Complete,
    /// Some eligible tasks were cut short or left out.
    Partial,
}

impl PlanStatus {
    pub fn message(self) -> &'static str {
        match self {
            PlanStatus::NoTasks => "No pending tasks. Add a few and plan again.",
            PlanStatus::NoWindows => "No free time slots given, so every task is deferred.",
            PlanStatus::NothingEligible => {
                "Every task needs more energy than you have today. Nothing scheduled."
            }
            PlanStatus::Complete => "Everything you can take on today fits.",
            PlanStatus::Partial => "Some tasks could not be fully scheduled today.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeferReason {
    EnergyMismatch,
    NoCapacity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredTask {
    pub task_index: usize,
    pub name: String,
    pub requested: u32,
    pub scheduled: u32,
    pub reason: DeferReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub status: PlanStatus,
    pub total_capacity: u32,
    pub scheduled_minutes: u32,
    pub free_minutes: u32,
    pub deferred: Vec<DeferredTask>,
}

/// Summarize a plan produced by [`crate::planner::generate_day_plan`] from
/// the same inputs.
pub fn summarize(
    tasks: &[Task],
    windows: &[TimeWindow],
    energy_level: &str,
    today: NaiveDate,
    plan: &[Allocation],
) -> PlanSummary {
    let energy = EnergyLevel::parse_lenient(energy_level);

    let total_capacity: u32 = windows
        .iter()
        .filter_map(|w| u32::try_from(w.minutes()).ok())
        .sum();
    let scheduled_minutes: u32 = plan.iter().map(|a| a.allocated_minutes).sum();

    let mut per_task = vec![0u32; tasks.len()];
    for a in plan {
        if let Some(m) = per_task.get_mut(a.task_index) {
            *m += a.allocated_minutes;
        }
    }

    let mut deferred = Vec::new();
    let mut eligible = 0;
    for (i, t) in tasks.iter().enumerate() {
        let p = t.normalize(i, today);
        let reason = if !energy.admits(p.energy) {
            DeferReason::EnergyMismatch
        } else {
            eligible += 1;
            if per_task[i] >= p.duration {
                continue;
            }
            DeferReason::NoCapacity
        };
        deferred.push(DeferredTask {
            task_index: i,
            name: p.name,
            requested: p.duration,
            scheduled: per_task[i],
            reason,
        });
    }

    let status = if tasks.is_empty() {
        PlanStatus::NoTasks
    } else if total_capacity == 0 {
        PlanStatus::NoWindows
    } else if eligible == 0 {
        PlanStatus::NothingEligible
    } else if deferred.iter().any(|d| d.reason == DeferReason::NoCapacity) {
        PlanStatus::Partial
    } else {
        PlanStatus::Complete
    };

    PlanSummary {
        status,
        total_capacity,
        scheduled_minutes,
        free_minutes: total_capacity.saturating_sub(scheduled_minutes),
        deferred,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::generate_day_plan;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn run(tasks: &[Task], windows: &[TimeWindow], energy: &str) -> PlanSummary {
        let plan = generate_day_plan(tasks, windows, energy, today());
        summarize(tasks, windows, energy, today(), &plan)
    }

    #[test]
    fn test_distinct_empty_statuses() {
        let windows = [TimeWindow::from_hm("09:00", "10:00").unwrap()];
        assert_eq!(run(&[], &windows, "medium").status, PlanStatus::NoTasks);

        let tasks = vec![Task::new("x")];
        assert_eq!(run(&tasks, &[], "medium").status, PlanStatus::NoWindows);

        let heavy = vec![Task::new("gym").with_energy("high")];
        let s = run(&heavy, &windows, "low");
        assert_eq!(s.status, PlanStatus::NothingEligible);
        assert_eq!(s.deferred[0].reason, DeferReason::EnergyMismatch);
    }

    #[test]
    fn test_partial_reports_shortfall() {
        let tasks = vec![Task::new("Write report").with_duration(90)];
        let windows = [TimeWindow::from_hm("09:00", "10:00").unwrap()];
        let s = run(&tasks, &windows, "medium");

        assert_eq!(s.status, PlanStatus::Partial);
        assert_eq!(s.scheduled_minutes, 60);
        assert_eq!(s.free_minutes, 0);
        assert_eq!(s.deferred.len(), 1);
        assert_eq!(s.deferred[0].requested, 90);
        assert_eq!(s.deferred[0].scheduled, 60);
        assert_eq!(s.deferred[0].reason, DeferReason::NoCapacity);
    }

    #[test]
    fn test_complete_with_energy_deferral() {
        let tasks = vec![
            Task::new("email").with_energy("low").with_duration(20),
            Task::new("proof").with_energy("high").with_duration(20),
        ];
        let windows = [TimeWindow::from_hm("09:00", "10:00").unwrap()];
        let s = run(&tasks, &windows, "medium");

        assert_eq!(s.status, PlanStatus::Complete);
        assert_eq!(s.free_minutes, 40);
        assert_eq!(s.deferred.len(), 1);
        assert_eq!(s.deferred[0].name, "proof");
        assert!(!s.status.message().is_empty());
    }
}
