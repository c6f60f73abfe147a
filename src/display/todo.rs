//! Todo display formatting

use crate::models::Todo;

/// Format todos one per line, open ones first
pub fn format_todo_list(todos: &[Todo]) -> String {
    if todos.is_empty() {
        return "No todos found.".to_string();
    }

    let (done, open): (Vec<&Todo>, Vec<&Todo>) = todos.iter().partition(|t| t.is_completed());

    let mut lines: Vec<String> = open.iter().map(|t| t.to_string()).collect();
    lines.extend(done.iter().map(|t| t.to_string()));
    lines.push(String::new());
    lines.push(format!("{} open, {} done", open.len(), done.len()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_open_todos_listed_first() {
        let now = Utc::now();
        let mut done = Todo::new(1, "Done thing", now);
        done.complete(now);
        let open = Todo::new(2, "Open thing", now).with_project("Home");

        let output = format_todo_list(&[done, open]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "[ ] #2 Open thing [Home]");
        assert_eq!(lines[1], "[x] #1 Done thing");
        assert!(output.ends_with("1 open, 1 done"));
    }
}
