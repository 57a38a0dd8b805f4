//! Error types for the media prober.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for a single probe.
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;

/// Main error type for the media prober.
#[derive(Error, Debug)]
pub enum Error {
    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    // Config errors
    #[error("Invalid config file {path}: {reason}")]
    InvalidConfig { path: String, reason: String },

    // Report errors
    #[error("Invalid report file: {0}")]
    InvalidReportFile(String),

    // Probe errors
    #[error(transparent)]
    Probe(#[from] ProbeError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}

/// Coarse classification of a probe failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeErrorKind {
    /// The probe binary could not be run to a successful exit.
    ExecutionFailed,
    /// The probe binary ran but its output was unusable.
    ParseFailed,
}

impl std::fmt::Display for ProbeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeErrorKind::ExecutionFailed => write!(f, "execution_failed"),
            ProbeErrorKind::ParseFailed => write!(f, "parse_failed"),
        }
    }
}

/// Failure of a single ffprobe run for one path.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("failed to launch ffprobe for {}: {source}", .path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "ffprobe exited with {} for {}: {stderr}",
        describe_exit(.code),
        .path.display()
    )]
    Exit {
        path: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    #[error("ffprobe timed out after {seconds}s for {}", .path.display())]
    TimedOut { path: PathBuf, seconds: u64 },

    #[error("failed to parse ffprobe output for {}: {reason}, output: {raw}", .path.display())]
    Parse {
        path: PathBuf,
        raw: String,
        reason: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "a signal".to_string(),
    }
}

impl ProbeError {
    /// Classify this failure.
    pub fn kind(&self) -> ProbeErrorKind {
        match self {
            ProbeError::Launch { .. } | ProbeError::Exit { .. } | ProbeError::TimedOut { .. } => {
                ProbeErrorKind::ExecutionFailed
            }
            ProbeError::Parse { .. } => ProbeErrorKind::ParseFailed,
        }
    }

    /// The path that was being probed.
    pub fn path(&self) -> &Path {
        match self {
            ProbeError::Launch { path, .. }
            | ProbeError::Exit { path, .. }
            | ProbeError::TimedOut { path, .. }
            | ProbeError::Parse { path, .. } => path,
        }
    }
}
