//! Task display formatting
//!
//! Formats tasks for terminal output as a table.

use chrono::{DateTime, Duration, Utc};

use crate::models::Task;

/// Format a list of tasks as a table, measuring running tasks up to `now`
pub fn format_task_list(tasks: &[Task], now: DateTime<Utc>) -> String {
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }

    let name_width = tasks.iter().map(|t| t.name.len()).max().unwrap_or(4).max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:<name_width$}  {:<16}  {:>8}  {}\n",
        "ID",
        "Name",
        "Started",
        "Duration",
        "Project",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:->5}  {:-<name_width$}  {:-<16}  {:->8}  {:-<7}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for task in tasks {
        let mut duration = format_duration(task.duration(now));
        if task.is_running() {
            duration.push('*');
        }
        output.push_str(&format!(
            "{:>5}  {:<name_width$}  {:<16}  {:>8}  {}\n",
            task.id,
            task.name,
            task.start.format("%Y-%m-%d %H:%M"),
            duration,
            task.project.as_deref().unwrap_or(""),
            name_width = name_width,
        ));
    }

    let total = tasks
        .iter()
        .fold(Duration::zero(), |acc, t| acc + t.duration(now));
    output.push_str(&format!("\nTotal: {}", format_duration(total)));
    output
}

/// Format a duration as hours and minutes, e.g. `1h05m`
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes().max(0);
    format!("{}h{:02}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::minutes(65)), "1h05m");
        assert_eq!(format_duration(Duration::minutes(0)), "0h00m");
        assert_eq!(format_duration(Duration::minutes(-5)), "0h00m");
    }

    #[test]
    fn test_format_task_list() {
        let start = Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2023, 1, 1, 12, 30, 0).unwrap();
        let tasks = vec![
            Task::new(1, "Write report", start)
                .with_project("Work")
                .with_end(start + Duration::hours(1)),
            Task::new(2, "Review", start),
        ];

        let output = format_task_list(&tasks, now);
        assert!(output.contains("Write report"));
        assert!(output.contains("1h00m"));
        assert!(output.contains("2h30m*"));
        assert!(output.contains("Total: 3h30m"));
    }

    #[test]
    fn test_empty_task_list() {
        assert_eq!(format_task_list(&[], Utc::now()), "No tasks found.");
    }
}
