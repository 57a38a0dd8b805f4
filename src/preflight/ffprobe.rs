//! FFprobe preflight check.

use super::CheckResult;
use crate::services::ffprobe::Ffprobe;

/// Check if ffprobe is installed.
pub fn check(ffprobe: &Ffprobe) -> CheckResult {
    if ffprobe.is_installed() {
        match ffprobe.version() {
            Ok(version) => CheckResult::ok("ffprobe", &format!("installed ({})", version)),
            Err(_) => CheckResult::ok("ffprobe", "installed"),
        }
    } else {
        CheckResult::fail(
            "ffprobe",
            &format!("not found at {}", ffprobe.binary().display()),
            "Install FFmpeg (e.g. sudo apt install ffmpeg) or set MEDIA_PROBE_FFPROBE",
        )
    }
}
