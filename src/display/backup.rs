//! Backup and password feedback formatting

use chrono::{DateTime, Utc};

use crate::backup::{BackupInfo, BackupInspection};
use crate::crypto::PasswordStrengthResult;

/// Format the backup list, numbered newest first
pub fn format_backup_list(backups: &[BackupInfo], now: DateTime<Utc>, verbose: bool) -> String {
    if backups.is_empty() {
        return "No backups found.\nCreate one with: squirrel backup create".to_string();
    }

    let mut output = String::from("Available Backups\n=================\n\n");
    for (i, backup) in backups.iter().enumerate() {
        let age = format_age(now.signed_duration_since(backup.created_at));
        if verbose {
            output.push_str(&format!(
                "{}. {} [{}]\n   Created: {}\n   Size: {}\n   Age: {}\n\n",
                i + 1,
                backup.filename,
                backup.kind,
                backup.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                format_size(backup.size_bytes),
                age,
            ));
        } else {
            output.push_str(&format!(
                "  {}. {} ({} ago, {}) [{}]\n",
                i + 1,
                backup.filename,
                age,
                format_size(backup.size_bytes),
                backup.kind,
            ));
        }
    }
    output.push_str(&format!("\nTotal: {} backup(s)", backups.len()));
    output
}

/// Format what a backup file contains
pub fn format_inspection(inspection: &BackupInspection, size_bytes: u64) -> String {
    let mut lines = vec![
        format!("Kind: {}", inspection.kind),
        format!("Size: {}", format_size(size_bytes)),
    ];
    if let Some(version) = &inspection.version {
        lines.push(format!("Format version: {}", version));
    }
    if let Some(created) = &inspection.created {
        lines.push(format!("Created: {}", created));
    }
    if let Some(app_version) = &inspection.app_version {
        lines.push(format!("App version: {}", app_version));
    }
    match &inspection.counts {
        Some(counts) => {
            lines.push(format!("Settings: {}", counts.settings));
            lines.push(format!("Tasks: {}", counts.tasks));
            lines.push(format!("Todos: {}", counts.todos));
        }
        None => lines.push("Contents: encrypted (password required)".to_string()),
    }
    lines.join("\n")
}

/// One-line strength feedback, e.g. `Strength: fair (orange). Missing: a number`
pub fn format_strength(result: &PasswordStrengthResult) -> String {
    let missing = result.requirements.missing();
    let mut line = format!("Strength: {} ({})", result.label, result.label.color());
    if !missing.is_empty() {
        line.push_str(&format!(". Missing: {}", missing.join(", ")));
    }
    line
}

/// Format an age in human-readable form
fn format_age(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    format!("{}mo", days / 30)
}

/// Format a file size in human-readable form
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
