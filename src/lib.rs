//! Media Probe Library
//!
//! Select video files and inspect their container metadata with ffprobe.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, ProbeError, ProbeErrorKind, ProbeResult, Result};
