use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use lifebalance_core::{Allocation, local_to_utc};

pub struct CalendarEvent {
    /// Stable per (date, task, part), so re-exporting a day replaces its events.
    pub uid: String,
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
    pub summary: String,
    pub description: String,
}

/// Turn plan entries into time-blocked events on `date` in `tz`.
pub fn plan_to_events(
    plan: &[Allocation],
    date: NaiveDate,
    tz: &str,
) -> Result<Vec<CalendarEvent>> {
    plan.iter()
        .map(|a| {
            let mut summary = a.task_name.clone();
            if a.chunked {
                summary.push_str(&format!(" ({}/{})", a.part, a.parts));
            }

            Ok(CalendarEvent {
                uid: format!(
                    "{}-task{}-part{}@lifebalance",
                    date.format("%Y%m%d"),
                    a.task_index,
                    a.part
                ),
                start_utc: local_to_utc(date, a.start, tz)?,
                end_utc: local_to_utc(date, a.end, tz)?,
                summary,
                description: format!(
                    "Category: {}\nWindow: {}\nDeadline: {}\n{}",
                    a.category, a.window_label, a.deadline, a.note
                ),
            })
        })
        .collect()
}

const ICS_LINE_OCTETS: usize = 75;

/// Serialize events as an RFC 5545 calendar (CRLF lines, long lines folded).
///
/// DTSTART/DTEND are UTC.
pub fn events_to_ics(events: &[CalendarEvent]) -> String {
    let mut out = String::new();
    let mut line = |content: String| out.push_str(&fold_line(&content));

    line("BEGIN:VCALENDAR".into());
    line("VERSION:2.0".into());
    line("PRODID:-//LifeBalance//Day Plan//EN".into());
    line("CALSCALE:GREGORIAN".into());

    for e in events {
        line("BEGIN:VEVENT".into());
        line(format!("UID:{}", e.uid));
        line(format!("DTSTAMP:{}", e.start_utc.format("%Y%m%dT%H%M%SZ")));
        line(format!("DTSTART:{}", e.start_utc.format("%Y%m%dT%H%M%SZ")));
        line(format!("DTEND:{}", e.end_utc.format("%Y%m%dT%H%M%SZ")));
        line(format!("SUMMARY:{}", escape_text(&e.summary)));
        line(format!("DESCRIPTION:{}", escape_text(&e.description)));
        line("END:VEVENT".into());
    }

    line("END:VCALENDAR".into());
    out
}

/// TEXT value escaping: backslash, newline, comma, semicolon.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | ',' | ';' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Split a content line into <= 75-octet pieces; continuations start with a space.
fn fold_line(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 8);
    let mut width = 0;
    for c in content.chars() {
        let len = c.len_utf8();
        if width + len > ICS_LINE_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(c);
        width += len;
    }
    out.push_str("\r\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifebalance_core::{Task, TimeWindow, generate_day_plan};

    #[test]
    fn test_chunked_plan_to_ics() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let tasks = vec![Task::new("Essay, draft").with_duration(90)];
        let windows = [
            TimeWindow::from_hm("09:00", "10:00").unwrap(),
            TimeWindow::from_hm("14:00", "15:00").unwrap(),
        ];
        let plan = generate_day_plan(&tasks, &windows, "medium", date);

        let events = plan_to_events(&plan, date, "Asia/Kolkata").unwrap();
        assert_eq!(events.len(), 2);
        // IST is UTC+05:30
        assert_eq!(events[0].start_utc.to_rfc3339(), "2024-01-10T03:30:00+00:00");
        assert_eq!(events[1].end_utc.to_rfc3339(), "2024-01-10T09:00:00+00:00");

        let ics = events_to_ics(&events);
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.contains("UID:20240110-task0-part1@lifebalance\r\n"));
        assert!(ics.contains("UID:20240110-task0-part2@lifebalance\r\n"));
        assert!(ics.contains("SUMMARY:Essay\\, draft (1/2)"));
        assert!(ics.contains("DTSTART:20240110T083000Z"));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
    }

    #[test]
    fn test_bad_timezone_is_error() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let tasks = vec![Task::new("x")];
        let windows = [TimeWindow::from_hm("09:00", "10:00").unwrap()];
        let plan = generate_day_plan(&tasks, &windows, "medium", date);
        assert!(plan_to_events(&plan, date, "Nowhere/Land").is_err());
    }

    #[test]
    fn test_long_lines_are_folded() {
        let folded = fold_line(&format!("DESCRIPTION:{}", "x".repeat(100)));
        let pieces: Vec<&str> = folded.trim_end_matches("\r\n").split("\r\n").collect();
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].len(), 75);
        assert!(pieces[1].starts_with(' '));
        assert_eq!(pieces[1].len(), 1 + 112 - 75);
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a,b;c\\d\ne"), "a\\,b\\;c\\\\d\\ne");
    }
}
