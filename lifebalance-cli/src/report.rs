//! Plan rendering: plain-text cards for the terminal and the JSON response shape.

use lifebalance_core::{Allocation, PlanSummary, PlannedTask};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PlanResponse<'a> {
    pub plan: &'a [Allocation],
    pub advice: &'a str,
    pub summary: &'a PlanSummary,
}

pub fn render_plan(plan: &[Allocation], advice: &str, summary: &PlanSummary) -> String {
    let mut s = String::new();
    s.push_str("# Plan for today\n\n");

    if plan.is_empty() {
        s.push_str("(nothing scheduled)\n\n");
    }

    let mut current_window = "";
    for a in plan {
        if a.window_label != current_window {
            current_window = &a.window_label;
            s.push_str(&format!("## {}\n", current_window));
        }
        let flag = if a.overdue { "!" } else { "-" };
        s.push_str(&format!(
            "{} {}-{}  {} [{}]  ({})\n",
            flag,
            a.start.format("%H:%M"),
            a.end.format("%H:%M"),
            a.task_name,
            a.category,
            a.note
        ));
    }

    s.push_str(&format!("\n## Advice\n\n{}\n\n", advice));
    s.push_str(&format!("## Summary\n\n{}\n", summary.status.message()));
    s.push_str(&format!(
        "Scheduled {} of {} available minutes ({} free).\n",
        summary.scheduled_minutes, summary.total_capacity, summary.free_minutes
    ));

    if !summary.deferred.is_empty() {
        s.push_str("\nDeferred:\n");
        for d in &summary.deferred {
            s.push_str(&format!(
                "- {} ({} of {} min, {:?})\n",
                d.name, d.scheduled, d.requested, d.reason
            ));
        }
    }

    s
}

pub fn render_tasks(tasks: &[PlannedTask]) -> String {
    let mut s = String::new();
    for t in tasks {
        let due = if t.is_overdue {
            format!("OVERDUE since {}", t.deadline)
        } else if t.is_today {
            "due today".to_string()
        } else {
            format!("due {}", t.deadline)
        };
        s.push_str(&format!(
            "{:>3}. {} | {} | {} min | energy={} | priority={} | {}\n",
            t.index + 1,
            t.name,
            t.category,
            t.duration,
            t.energy,
            t.priority,
            due
        ));
    }
    s
}
