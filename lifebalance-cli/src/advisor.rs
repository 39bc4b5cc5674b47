//! Coaching text shown next to the plan. Fixed templates, no model calls.

use lifebalance_core::Allocation;

pub fn generate_advice(plan: &[Allocation], energy_level: &str) -> String {
    if plan.is_empty() {
        return "No tasks scheduled, so no advice available.".to_string();
    }

    let base = match energy_level.trim().to_lowercase().as_str() {
        "high" => "You have high energy! Focus on the most challenging tasks first.",
        "medium" => "Maintain steady progress and take short breaks.",
        "low" => "Focus on small, easy tasks and recharge your energy.",
        _ => "Stay focused and take breaks between tasks. You got this!",
    };

    let mut advice = base.to_string();
    if plan.iter().any(|a| a.overdue) {
        advice.push_str(" Clear the overdue items first; they lead the plan for a reason.");
    }
    advice
}
