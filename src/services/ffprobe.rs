//! FFprobe service for extracting container metadata.

use crate::error::{ProbeError, ProbeResult};
use crate::models::config::FfprobeConfig;
use crate::models::media::MediaMetadata;
use crate::Result;
use serde::Deserialize;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

/// Entries requested from ffprobe.
pub const SHOW_ENTRIES: &str = "format=duration,size,bit_rate";

/// Something that can turn a path into media metadata.
pub trait Probe {
    fn probe(&self, path: &Path) -> impl Future<Output = ProbeResult<MediaMetadata>>;
}

/// FFprobe output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: Option<FfprobeFormat>,
}

/// FFprobe format information.
#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<FfprobeValue>,
    size: Option<FfprobeValue>,
    bit_rate: Option<FfprobeValue>,
}

/// ffprobe prints numbers as strings in JSON mode, but accept both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FfprobeValue {
    Text(String),
    Number(serde_json::Number),
}

impl FfprobeValue {
    fn as_text(&self) -> String {
        match self {
            FfprobeValue::Text(s) => s.trim().to_string(),
            FfprobeValue::Number(n) => n.to_string(),
        }
    }
}

/// A single ffprobe run: program, fixed arguments and the target path.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub path: PathBuf,
}

impl Invocation {
    /// Render the invocation as one shell-style line, for logging.
    ///
    /// The process itself is spawned from the argument vector, never
    /// through a shell.
    pub fn command_line(&self) -> String {
        format!(
            "{} {} \"{}\"",
            self.program.display(),
            self.args.join(" "),
            escape_double_quotes(&self.path.to_string_lossy())
        )
    }

    fn to_command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args)
            .arg(&self.path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

/// Escape embedded double quotes so the text can sit inside a quoted argument.
pub fn escape_double_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}

/// Handle to an ffprobe binary.
#[derive(Debug, Clone)]
pub struct Ffprobe {
    binary: PathBuf,
    timeout: Option<Duration>,
}

impl Ffprobe {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            timeout: None,
        }
    }

    /// Build from configuration, resolving bundled binaries under `base_dir`.
    pub fn from_config(config: &FfprobeConfig, base_dir: Option<&Path>) -> Self {
        let binary = config.resolve_binary(base_dir);
        tracing::debug!("Using ffprobe binary: {}", binary.display());
        Self {
            binary,
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Build the invocation used to probe `path`.
    pub fn invocation(&self, path: &Path) -> Invocation {
        Invocation {
            program: self.binary.clone(),
            args: ["-v", "error", "-show_entries", SHOW_ENTRIES, "-of", "json"]
                .iter()
                .map(|a| a.to_string())
                .collect(),
            path: path.to_path_buf(),
        }
    }

    /// Check if the binary can be run.
    pub fn is_installed(&self) -> bool {
        std::process::Command::new(&self.binary)
            .arg("-version")
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Get the first line of `ffprobe -version`.
    pub fn version(&self) -> Result<String> {
        let output = std::process::Command::new(&self.binary)
            .arg("-version")
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let first_line = stdout.lines().next().unwrap_or("unknown");

        Ok(first_line.to_string())
    }

    /// Run ffprobe on one path and parse its report.
    pub async fn extract_metadata(&self, path: &Path) -> ProbeResult<MediaMetadata> {
        let invocation = self.invocation(path);
        tracing::debug!("Running: {}", invocation.command_line());

        let mut cmd = invocation.to_command();
        let run = cmd.output();
        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, run).await {
                Ok(output) => output,
                Err(_) => {
                    return Err(ProbeError::TimedOut {
                        path: path.to_path_buf(),
                        seconds: limit.as_secs(),
                    })
                }
            },
            None => run.await,
        }
        .map_err(|source| ProbeError::Launch {
            path: path.to_path_buf(),
            source,
        })?;

        if !output.status.success() {
            return Err(ProbeError::Exit {
                path: path.to_path_buf(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_output(path, &output.stdout)
    }
}

impl Probe for Ffprobe {
    async fn probe(&self, path: &Path) -> ProbeResult<MediaMetadata> {
        self.extract_metadata(path).await
    }
}

/// Parse ffprobe JSON output into metadata.
///
/// Fails if the output is not JSON or any of the three fields is missing,
/// negative or not a number.
pub fn parse_output(path: &Path, stdout: &[u8]) -> ProbeResult<MediaMetadata> {
    let raw = || String::from_utf8_lossy(stdout).to_string();
    let fail = |reason: String| ProbeError::Parse {
        path: path.to_path_buf(),
        raw: raw(),
        reason,
    };

    let parsed: FfprobeOutput =
        serde_json::from_slice(stdout).map_err(|e| fail(e.to_string()))?;
    let format = parsed
        .format
        .ok_or_else(|| fail("missing format section".to_string()))?;

    let duration_text = required(format.duration.as_ref(), "duration").map_err(&fail)?;
    let duration: f64 = duration_text
        .parse()
        .map_err(|_| fail(format!("invalid duration: {}", duration_text)))?;
    if !duration.is_finite() || duration < 0.0 {
        return Err(fail(format!("invalid duration: {}", duration_text)));
    }

    let size_text = required(format.size.as_ref(), "size").map_err(&fail)?;
    let size: u64 = size_text
        .parse()
        .map_err(|_| fail(format!("invalid size: {}", size_text)))?;

    let bit_rate_text = required(format.bit_rate.as_ref(), "bit_rate").map_err(&fail)?;
    let bit_rate: u64 = bit_rate_text
        .parse()
        .map_err(|_| fail(format!("invalid bit_rate: {}", bit_rate_text)))?;

    Ok(MediaMetadata {
        duration,
        size,
        bit_rate,
    })
}

fn required(value: Option<&FfprobeValue>, name: &str) -> std::result::Result<String, String> {
    value
        .map(FfprobeValue::as_text)
        .ok_or_else(|| format!("missing field format.{}", name))
}
