//! Command line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Media Probe - Inspect video files with ffprobe
#[derive(Parser, Debug)]
#[command(name = "media-probe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    /// Path to config.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe paths directly, without the selection dialog
    Probe {
        /// Media files to probe
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Select media files or directories and probe each one
    Select {
        /// Paths to select (read from stdin with --stdin)
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Read newline-separated paths from standard input
        #[arg(long, conflicts_with = "paths")]
        stdin: bool,

        /// Probe selected directories as-is instead of expanding them
        #[arg(long)]
        no_expand: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Save a JSON report to this path
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Run preflight checks only
    Check,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
