//! lifebalance-core: task model and the day-plan scheduler

pub mod energy;
pub mod planner;
pub mod summary;
pub mod task;
pub mod time;
pub mod window;

pub use energy::EnergyLevel;
pub use planner::{Allocation, generate_day_plan, order_tasks};
pub use summary::{DeferReason, DeferredTask, PlanStatus, PlanSummary, summarize};
pub use task::{PlannedTask, Task, parse_deadline};
pub use time::{date_in, local_to_utc, today_in};
pub use window::{TimeWindow, parse_slots};
