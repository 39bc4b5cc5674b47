pub mod csv_tasks;
pub mod json_tasks;

pub use csv_tasks::parse_tasks_csv;
pub use json_tasks::parse_tasks_json;
