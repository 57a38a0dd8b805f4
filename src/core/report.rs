//! Probe report persistence.

use crate::core::selection::SelectionSession;
use crate::models::media::{DialogSelection, MediaMetadata, ProbeEntry, ProbeStatus};
use crate::services::ffprobe::Probe;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Report format version.
pub const REPORT_VERSION: &str = "1.0";

/// A settled selection, ready to be written out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub version: String,
    pub created_at: String,
    pub selection: DialogSelection,
    pub entries: Vec<ReportEntry>,
}

/// Serialized outcome of one probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: ReportOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportOutcome {
    Pending,
    Succeeded { metadata: MediaMetadata },
    Failed { kind: String, message: String },
}

impl From<&ProbeEntry> for ReportEntry {
    fn from(entry: &ProbeEntry) -> Self {
        let outcome = match &entry.status {
            ProbeStatus::Pending => ReportOutcome::Pending,
            ProbeStatus::Succeeded(metadata) => ReportOutcome::Succeeded {
                metadata: *metadata,
            },
            ProbeStatus::Failed(e) => ReportOutcome::Failed {
                kind: e.kind().to_string(),
                message: e.to_string(),
            },
        };
        Self {
            path: entry.path.clone(),
            outcome,
        }
    }
}

impl Report {
    /// Snapshot a session.
    pub fn from_session<P: Probe>(session: &SelectionSession<P>) -> Self {
        Self {
            version: REPORT_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            selection: session.selection().cloned().unwrap_or_default(),
            entries: session.entries().iter().map(ReportEntry::from).collect(),
        }
    }
}

/// Save a report to a JSON file.
pub fn save_report(report: &Report, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    tracing::info!("Report saved to {}", path.display());
    Ok(())
}

/// Load a report from a JSON file.
pub fn load_report(path: &Path) -> Result<Report> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| crate::Error::InvalidReportFile(format!("{}: {}", path.display(), e)))
}
