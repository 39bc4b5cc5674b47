//! Day planner: ranks the day's tasks and packs them into availability windows.
//!
//! Ranking policy (deterministic):
//! 1) normalize every task (defaults, deadline fallback = today)
//! 2) drop tasks needing more energy than the user has today
//! 3) overdue bucket: deadline ASC, then priority DESC, then energy DESC
//! 4) upcoming bucket: priority DESC, then energy DESC, then deadline ASC
//! 5) all overdue tasks go before all upcoming tasks
//!
//! Packing is greedy and single-pass: windows are consumed strictly left to
//! right, a task takes `min(remaining task, remaining window)` from each window
//! it touches, and once every window is full the remaining tasks are deferred.

use crate::energy::EnergyLevel;
use crate::task::{PlannedTask, Task};
use crate::window::TimeWindow;
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// One (task, window) pairing in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Position of the source task in the caller's list.
    pub task_index: usize,
    pub task_name: String,
    pub category: String,

    /// `"HH:MM-HH:MM"` of the window this entry was drawn from.
    pub window_label: String,

    /// Sub-block of the window actually occupied.
    pub start: NaiveTime,
    pub end: NaiveTime,

    pub allocated_minutes: u32,

    pub overdue: bool,
    pub deadline: NaiveDate,

    /// The task was spread over more than one window.
    pub chunked: bool,
    /// 1-based position among this task's entries.
    pub part: usize,
    pub parts: usize,

    /// The task's whole duration made it into the plan.
    pub complete: bool,

    /// Human-readable suffix, e.g. "60 min, part 1 of 2, overdue since 2024-01-01".
    pub note: String,
}

#[derive(Debug)]
struct Slot {
    window: TimeWindow,
    capacity: u32,
    free: u32,
}

/// Normalize, filter by energy and rank tasks for one planning run.
pub fn order_tasks(tasks: &[Task], energy: EnergyLevel, today: NaiveDate) -> Vec<PlannedTask> {
    let (mut overdue, mut upcoming): (Vec<PlannedTask>, Vec<PlannedTask>) = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| t.normalize(i, today))
        .filter(|t| energy.admits(t.energy))
        .partition(|t| t.is_overdue);

    // Stable sorts: full ties keep input order.
    overdue.sort_by(overdue_order);
    upcoming.sort_by(upcoming_order);

    overdue.extend(upcoming);
    overdue
}

fn overdue_order(a: &PlannedTask, b: &PlannedTask) -> Ordering {
    a.deadline
        .cmp(&b.deadline)
        .then_with(|| b.priority.cmp(&a.priority))
        .then_with(|| b.energy.cmp(&a.energy))
}

fn upcoming_order(a: &PlannedTask, b: &PlannedTask) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| b.energy.cmp(&a.energy))
        .then_with(|| a.deadline.cmp(&b.deadline))
}

/// Build today's plan.
///
/// `energy_level` is matched case-insensitively; unknown values count as
/// "medium". Windows with a non-positive duration are ignored. Caller-owned
/// tasks are never modified.
pub fn generate_day_plan(
    tasks: &[Task],
    windows: &[TimeWindow],
    energy_level: &str,
    today: NaiveDate,
) -> Vec<Allocation> {
    let energy = EnergyLevel::parse_lenient(energy_level);

    let mut slots: Vec<Slot> = windows
        .iter()
        .filter_map(|w| {
            let capacity = u32::try_from(w.minutes()).ok().filter(|m| *m > 0)?;
            Some(Slot {
                window: *w,
                capacity,
                free: capacity,
            })
        })
        .collect();

    if tasks.is_empty() || slots.is_empty() {
        debug!(tasks = tasks.len(), windows = slots.len(), "nothing to plan");
        return Vec::new();
    }

    let ordered = order_tasks(tasks, energy, today);
    debug!(
        energy = %energy,
        eligible = ordered.len(),
        deferred_for_energy = tasks.len() - ordered.len(),
        windows = slots.len(),
        "ranked tasks"
    );

    let mut plan = Vec::new();
    let mut cursor = 0;
    let mut untouched = 0;

    for task in &ordered {
        if cursor >= slots.len() {
            untouched += 1;
            continue;
        }

        let first = plan.len();
        let mut remaining = task.duration;

        while remaining > 0 && cursor < slots.len() {
            let slot = &mut slots[cursor];
            let take = remaining.min(slot.free);

            let offset = i64::from(slot.capacity - slot.free);
            let start = slot.window.start + Duration::minutes(offset);
            let end = start + Duration::minutes(i64::from(take));

            plan.push(Allocation {
                task_index: task.index,
                task_name: task.name.clone(),
                category: task.category.clone(),
                window_label: slot.window.label(),
                start,
                end,
                allocated_minutes: take,
                overdue: task.is_overdue,
                deadline: task.deadline,
                chunked: false,
                part: 0,
                parts: 0,
                complete: false,
                note: String::new(),
            });

            slot.free -= take;
            remaining -= take;

            if slot.free == 0 {
                cursor += 1;
            }
        }

        if remaining > 0 {
            debug!(task = %task.name, dropped_minutes = remaining, "windows exhausted mid-task");
        }

        finish_entries(&mut plan[first..], task, task.duration - remaining);
    }

    if untouched > 0 {
        debug!(deferred = untouched, "tasks left for a future run");
    }

    plan
}

/// Fill in chunking/completion markers once a task's entries are known.
fn finish_entries(entries: &mut [Allocation], task: &PlannedTask, scheduled: u32) {
    let parts = entries.len();
    let complete = scheduled == task.duration;

    for (i, e) in entries.iter_mut().enumerate() {
        e.part = i + 1;
        e.parts = parts;
        e.chunked = parts > 1;
        e.complete = complete;

        let mut bits = vec![format!("{} min", e.allocated_minutes)];
        if e.chunked {
            bits.push(format!("part {} of {}", e.part, parts));
        }
        if !complete {
            bits.push(format!("partial: {scheduled} of {} min", task.duration));
        }
        if task.is_overdue {
            bits.push(format!("overdue since {}", task.deadline));
        }
        e.note = bits.join(", ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn w(start: &str, end: &str) -> TimeWindow {
        TimeWindow::from_hm(start, end).unwrap()
    }

    fn names(plan: &[Allocation]) -> Vec<&str> {
        plan.iter().map(|a| a.task_name.as_str()).collect()
    }

    #[test]
    fn test_write_report_overdue_partial() {
        let tasks = vec![
            Task::new("Write report")
                .with_duration(90)
                .with_priority(5)
                .with_energy("high")
                .with_deadline("2024-01-01"),
        ];
        let plan = generate_day_plan(&tasks, &[w("09:00", "10:00")], "high", today());

        assert_eq!(plan.len(), 1);
        let a = &plan[0];
        assert_eq!(a.allocated_minutes, 60);
        assert!(a.overdue);
        assert!(!a.chunked);
        assert!(!a.complete);
        assert_eq!(a.window_label, "09:00-10:00");
        assert_eq!(a.note, "60 min, partial: 60 of 90 min, overdue since 2024-01-01");
    }

    #[test]
    fn test_empty_inputs() {
        let windows = [w("09:00", "10:00")];
        assert!(generate_day_plan(&[], &windows, "high", today()).is_empty());

        let tasks = vec![Task::new("X").with_duration(30).with_priority(3).with_energy("low")];
        assert!(generate_day_plan(&tasks, &[], "medium", today()).is_empty());
    }

    #[test]
    fn test_energy_filter() {
        let tasks = vec![Task::new("Deep work").with_energy("high").with_duration(30)];
        let windows = [w("09:00", "10:00")];

        assert!(generate_day_plan(&tasks, &windows, "low", today()).is_empty());
        assert_eq!(generate_day_plan(&tasks, &windows, "HIGH", today()).len(), 1);
        // unknown level behaves like medium
        assert!(generate_day_plan(&tasks, &windows, "sleepy", today()).is_empty());
    }

    #[test]
    fn test_overdue_sorted_by_deadline_before_upcoming() {
        let tasks = vec![
            Task::new("upcoming").with_priority(2).with_deadline("2024-01-11"),
            Task::new("late-3").with_priority(4).with_deadline("2024-01-03"),
            Task::new("late-1").with_priority(4).with_deadline("2024-01-01"),
        ];
        let plan = generate_day_plan(&tasks, &[w("08:00", "12:00")], "high", today());
        assert_eq!(names(&plan), vec!["late-1", "late-3", "upcoming"]);
    }

    #[test]
    fn test_upcoming_priority_then_energy_then_deadline() {
        let tasks = vec![
            Task::new("p3-soon").with_priority(3).with_energy("low").with_deadline("2024-01-11"),
            Task::new("p5").with_priority(5).with_energy("low"),
            Task::new("p3-high-energy").with_priority(3).with_energy("high"),
            Task::new("p3-later").with_priority(3).with_energy("low").with_deadline("2024-01-20"),
        ];
        let ordered = order_tasks(&tasks, EnergyLevel::High, today());
        let got: Vec<&str> = ordered.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(got, vec!["p5", "p3-high-energy", "p3-soon", "p3-later"]);
    }

    #[test]
    fn test_overdue_tie_breaks_on_priority_then_energy() {
        let tasks = vec![
            Task::new("low-prio").with_priority(2).with_deadline("2024-01-05"),
            Task::new("hi-prio-low-energy").with_priority(4).with_energy("low").with_deadline("2024-01-05"),
            Task::new("hi-prio-med-energy").with_priority(4).with_deadline("2024-01-05"),
        ];
        let ordered = order_tasks(&tasks, EnergyLevel::High, today());
        let got: Vec<&str> = ordered.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(got, vec!["hi-prio-med-energy", "hi-prio-low-energy", "low-prio"]);
    }

    #[test]
    fn test_chunking_across_windows() {
        let tasks = vec![Task::new("Thesis").with_duration(100).with_category("study")];
        let windows = [w("09:00", "10:00"), w("15:00", "16:00")];
        let plan = generate_day_plan(&tasks, &windows, "medium", today());

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].allocated_minutes, 60);
        assert_eq!(plan[1].allocated_minutes, 40);
        assert!(plan.iter().all(|a| a.chunked && a.complete));
        assert_eq!((plan[1].part, plan[1].parts), (2, 2));
        assert_eq!(plan[1].start, NaiveTime::from_hms_opt(15, 0, 0).unwrap());
        assert_eq!(plan[1].end, NaiveTime::from_hms_opt(15, 40, 0).unwrap());
        assert_eq!(plan[0].note, "60 min, part 1 of 2");
        assert_eq!(plan[0].category, "study");
    }

    #[test]
    fn test_tasks_share_a_window_back_to_back() {
        let tasks = vec![
            Task::new("a").with_duration(20).with_priority(5),
            Task::new("b").with_duration(25).with_priority(4),
        ];
        let plan = generate_day_plan(&tasks, &[w("09:00", "10:00")], "medium", today());
        assert_eq!(plan[0].end, plan[1].start);
        assert_eq!(plan[1].end, NaiveTime::from_hms_opt(9, 45, 0).unwrap());
    }

    #[test]
    fn test_stops_when_windows_exhausted() {
        let tasks = vec![
            Task::new("first").with_duration(60).with_priority(5),
            Task::new("second").with_duration(30).with_priority(1),
        ];
        let plan = generate_day_plan(&tasks, &[w("09:00", "10:00")], "medium", today());
        assert_eq!(names(&plan), vec!["first"]);
    }

    #[test]
    fn test_non_positive_windows_dropped() {
        let tasks = vec![Task::new("t").with_duration(30)];
        let windows = [w("10:00", "10:00"), w("12:00", "11:00"), w("13:00", "13:30")];
        let plan = generate_day_plan(&tasks, &windows, "medium", today());
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].window_label, "13:00-13:30");
    }

    #[test]
    fn test_does_not_mutate_input() {
        let tasks = vec![Task::new("t").with_duration(-5).with_energy("MEDIUM")];
        let before = tasks.clone();
        let _ = generate_day_plan(&tasks, &[w("09:00", "09:30")], "medium", today());
        assert_eq!(tasks, before);
    }

    #[test]
    fn test_allocation_serializes() {
        let tasks = vec![Task::new("t").with_duration(15)];
        let plan = generate_day_plan(&tasks, &[w("09:00", "09:30")], "medium", today());
        let v = serde_json::to_value(&plan[0]).unwrap();
        assert_eq!(v["task_name"], "t");
        assert_eq!(v["allocated_minutes"], 15);
        assert_eq!(v["window_label"], "09:00-09:30");
        assert_eq!(v["deadline"], "2024-01-10");
    }
}
