//! CSV task sheets.
//!
//! Header row required; columns are matched by name, any order, any case:
//!   name,category,duration,energy_required,priority,deadline,completed
//! Only `name` is mandatory. `energy` is accepted for `energy_required`.

use anyhow::{Context, Result, bail};
use lifebalance_core::Task;
use std::io::Read;
use tracing::debug;

use crate::types::StoredTask;

#[derive(Debug, Default)]
struct Columns {
    name: Option<usize>,
    category: Option<usize>,
    duration: Option<usize>,
    energy: Option<usize>,
    priority: Option<usize>,
    deadline: Option<usize>,
    completed: Option<usize>,
    id: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut cols = Columns::default();
        for (i, h) in headers.iter().enumerate() {
            match h.trim().to_lowercase().as_str() {
                "name" | "task" => cols.name = Some(i),
                "category" => cols.category = Some(i),
                "duration" | "minutes" => cols.duration = Some(i),
                "energy_required" | "energy" => cols.energy = Some(i),
                "priority" => cols.priority = Some(i),
                "deadline" | "due" => cols.deadline = Some(i),
                "completed" | "done" => cols.completed = Some(i),
                "id" => cols.id = Some(i),
                _ => {}
            }
        }
        cols
    }
}

fn cell<'a>(record: &'a csv::StringRecord, col: Option<usize>) -> Option<&'a str> {
    col.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn parse_bool(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "true" | "yes" | "y" | "1" | "x")
}

pub fn parse_tasks_csv<R: Read>(reader: R) -> Result<Vec<StoredTask>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers().context("reading CSV header")?.clone();
    let cols = Columns::from_headers(&headers);
    if cols.name.is_none() {
        let got: Vec<&str> = headers.iter().collect();
        bail!("CSV header has no 'name' column (got: {})", got.join(","));
    }

    let mut out = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("reading CSV row {}", line + 2))?;

        let Some(name) = cell(&record, cols.name) else {
            debug!(row = line + 2, "skipping row without a name");
            continue;
        };

        // Bad numbers become absent; the planner fills in defaults.
        let task = Task {
            name: name.to_string(),
            category: cell(&record, cols.category).map(str::to_string),
            duration: cell(&record, cols.duration).and_then(|s| s.parse().ok()),
            energy_required: cell(&record, cols.energy).map(str::to_string),
            priority: cell(&record, cols.priority).and_then(|s| s.parse().ok()),
            deadline: cell(&record, cols.deadline).map(str::to_string),
        };

        out.push(StoredTask {
            id: cell(&record, cols.id).and_then(|s| s.parse().ok()),
            task,
            completed: cell(&record, cols.completed).map(parse_bool).unwrap_or(false),
            created_at: None,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sheet_any_column_order() {
        let csv = "\
Priority,Name,Duration,Energy,Deadline,Category,Done
5,Write report,90,High,2024-01-01,work,
2,Stretch,15,low,,health,yes
";
        let tasks = parse_tasks_csv(csv.as_bytes()).unwrap();
        assert_eq!(tasks.len(), 2);

        let first = &tasks[0].task;
        assert_eq!(first.name, "Write report");
        assert_eq!(first.priority, Some(5));
        assert_eq!(first.duration, Some(90));
        assert_eq!(first.energy_required.as_deref(), Some("High"));
        assert_eq!(first.deadline.as_deref(), Some("2024-01-01"));
        assert!(!tasks[0].completed);

        assert_eq!(tasks[1].task.deadline, None);
        assert!(tasks[1].completed);
    }

    #[test]
    fn test_bad_numbers_become_absent() {
        let csv = "name,duration,priority\nRead,about an hour,high\n";
        let tasks = parse_tasks_csv(csv.as_bytes()).unwrap();
        assert_eq!(tasks[0].task.duration, None);
        assert_eq!(tasks[0].task.priority, None);
    }

    #[test]
    fn test_rows_without_name_are_skipped() {
        let csv = "name,duration\n,30\nCook,45\n";
        let tasks = parse_tasks_csv(csv.as_bytes()).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task.name, "Cook");
    }

    #[test]
    fn test_missing_name_column() {
        let err = parse_tasks_csv("title,duration\nx,10\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("no 'name' column"));
    }
}
