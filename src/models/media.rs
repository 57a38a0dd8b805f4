//! Media-related data models.

use crate::error::ProbeError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Container-level metadata reported by ffprobe for one file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    /// Duration in seconds.
    pub duration: f64,
    /// File size in bytes.
    pub size: u64,
    /// Overall bit rate in bits per second.
    pub bit_rate: u64,
}

impl std::fmt::Display for MediaMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "duration {:.2}s, size {} bytes, bit rate {} bps",
            self.duration, self.size, self.bit_rate
        )
    }
}

/// Result of one open-dialog invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogSelection {
    /// Selected paths, in the order the dialog returned them.
    pub file_paths: Vec<PathBuf>,
    /// Security-scoped bookmarks, only present on sandboxed platforms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmarks: Option<Vec<String>>,
    /// Whether the user dismissed the dialog.
    #[serde(default)]
    pub canceled: bool,
}

impl DialogSelection {
    /// A selection of the given paths without bookmarks.
    pub fn new(file_paths: Vec<PathBuf>) -> Self {
        Self {
            file_paths,
            bookmarks: None,
            canceled: false,
        }
    }

    /// The selection produced by a dismissed dialog.
    pub fn cancelled() -> Self {
        Self {
            file_paths: Vec::new(),
            bookmarks: None,
            canceled: true,
        }
    }

    /// Check if nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.file_paths.is_empty()
    }
}

/// Outcome of a probe request.
#[derive(Debug)]
pub enum ProbeStatus {
    Pending,
    Succeeded(MediaMetadata),
    Failed(ProbeError),
}

impl ProbeStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, ProbeStatus::Pending)
    }

    pub fn metadata(&self) -> Option<&MediaMetadata> {
        match self {
            ProbeStatus::Succeeded(meta) => Some(meta),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ProbeError> {
        match self {
            ProbeStatus::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// One probe request and its current status.
#[derive(Debug)]
pub struct ProbeEntry {
    /// Path handed to the prober.
    pub path: PathBuf,
    /// Current status.
    pub status: ProbeStatus,
}

impl ProbeEntry {
    pub fn pending(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            status: ProbeStatus::Pending,
        }
    }
}
