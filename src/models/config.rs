//! Configuration model.

use crate::core::scanner::DEFAULT_VIDEO_EXTENSIONS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the ffprobe binary path.
pub const FFPROBE_ENV: &str = "MEDIA_PROBE_FFPROBE";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ffprobe configuration.
    pub ffprobe: FfprobeConfig,
    /// Selection configuration.
    pub selection: SelectionConfig,
}

/// ffprobe configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FfprobeConfig {
    /// Explicit binary path. Resolved from the bundle layout or PATH when unset.
    pub binary: Option<PathBuf>,
    /// Per-probe timeout in seconds. No timeout when unset.
    pub timeout_secs: Option<u64>,
}

/// Selection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Extensions offered by the dialog filter.
    pub extensions: Vec<String>,
    /// Replace selected directories with the media files they contain.
    pub expand_directories: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_VIDEO_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            expand_directories: true,
        }
    }
}

impl FfprobeConfig {
    /// Resolve the ffprobe binary to run.
    ///
    /// Order: configured path or `MEDIA_PROBE_FFPROBE`, then a bundled
    /// `ffmpeg/<platform>/ffprobe` under `base_dir`, then `ffprobe` directly
    /// under `base_dir`, then `ffprobe` on `PATH`.
    pub fn resolve_binary(&self, base_dir: Option<&Path>) -> PathBuf {
        if let Some(binary) = &self.binary {
            return binary.clone();
        }
        if let Ok(binary) = std::env::var(FFPROBE_ENV) {
            if !binary.is_empty() {
                return PathBuf::from(binary);
            }
        }

        let name = binary_name();
        if let Some(base) = base_dir {
            let candidates = [
                base.join("ffmpeg").join(platform_dir()).join(&name),
                base.join(&name),
            ];
            for candidate in candidates {
                if candidate.is_file() {
                    return candidate;
                }
            }
        }

        PathBuf::from(name)
    }
}

/// Platform directory name used by the bundled ffmpeg layout.
pub fn platform_dir() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        "windows" => "win32",
        other => other,
    }
}

fn binary_name() -> String {
    format!("ffprobe{}", std::env::consts::EXE_SUFFIX)
}

/// Directory of the running executable.
pub fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("media_probe")
}

/// Default configuration file path.
pub fn default_config_path() -> PathBuf {
    dirs_config_path().join("config.toml")
}

/// Load configuration from file.
///
/// A missing or invalid file yields the defaults.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path
        .map(|p| p.to_path_buf())
        .unwrap_or_else(default_config_path);

    if !config_path.exists() {
        return Config::default();
    }

    match read_config(&config_path) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            config
        }
        Err(e) => {
            tracing::warn!("{}, using defaults", e);
            Config::default()
        }
    }
}

/// Read and parse a TOML configuration file.
pub fn read_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content).map_err(|e| crate::Error::InvalidConfig {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(content)
}
