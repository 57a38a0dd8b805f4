//! Terminal rendering for selections and probe results.

use crate::core::selection::Summary;
use crate::models::media::{DialogSelection, ProbeEntry, ProbeStatus};
use crate::utils::fs::display_name;
use colored::Colorize;

/// Render the dialog result block.
pub fn selection_lines(selection: &DialogSelection) -> Vec<String> {
    let paths: Vec<String> = selection
        .file_paths
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    let paths = serde_json::to_string(&paths).unwrap_or_else(|_| "[]".to_string());
    let bookmarks = match &selection.bookmarks {
        Some(b) => serde_json::to_string(b).unwrap_or_else(|_| "[]".to_string()),
        None => "undefined".to_string(),
    };

    let mut lines = vec![
        format!("{} {}", "filePaths:".bold(), paths),
        format!("{} {}", "bookmarks:".bold(), bookmarks),
    ];
    if selection.canceled {
        lines.push("Dialog cancelled, nothing selected.".yellow().to_string());
    }
    lines
}

/// Render one settled (or pending) entry.
pub fn entry_line(entry: &ProbeEntry) -> String {
    let name = display_name(&entry.path);
    match &entry.status {
        ProbeStatus::Pending => format!("{} {}", "[..]".dimmed(), name),
        ProbeStatus::Succeeded(meta) => {
            let meta = serde_json::to_string(meta).unwrap_or_else(|_| meta.to_string());
            format!("{} {}: {}", "[OK]".green(), name.bold(), meta)
        }
        ProbeStatus::Failed(e) => format!("{} {}: {}", "[FAIL]".red(), name.bold(), e),
    }
}

/// Render the summary block.
pub fn summary_lines(summary: &Summary) -> Vec<String> {
    vec![
        format!("{}", "Probe Summary".bold().green()),
        format!("  {} {}", "Selected:".bold(), summary.total),
        format!("  {} {}", "Succeeded:".bold(), summary.succeeded),
        format!("  {} {}", "Failed:".bold(), summary.failed),
    ]
}
