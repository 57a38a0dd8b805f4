//! Directory scanner module.
//!
//! Knows which extensions count as video and expands selected
//! directories into the media files they contain.

use crate::utils::fs::get_extension;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Video extensions offered by the media dialog filter.
pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &[
    "3gp", "mp4", "webm", "mov", "rmvb", "rm", "avi", "flv", "mpg", "mkv", "hevc", "m4v", "wmv",
    "ts",
];

/// Check if a file extension is one of the allowed extensions.
pub fn is_video_extension<S: AsRef<str>>(ext: &str, allowed: &[S]) -> bool {
    allowed.iter().any(|a| a.as_ref().eq_ignore_ascii_case(ext))
}

/// Check if a path has one of the allowed extensions.
pub fn has_video_extension<S: AsRef<str>>(path: &Path, allowed: &[S]) -> bool {
    get_extension(path)
        .map(|ext| is_video_extension(&ext, allowed))
        .unwrap_or(false)
}

/// Find media files under a directory, sorted by path.
pub fn scan_directory<S: AsRef<str>>(path: &Path, allowed: &[S]) -> crate::Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| has_video_extension(p, allowed))
        .collect();
    files.sort();

    tracing::debug!(
        "Expanded {} into {} media files",
        path.display(),
        files.len()
    );

    Ok(files)
}

/// Replace every directory in a selection with the media files it contains.
///
/// Files and paths that do not exist pass through unchanged, so the prober
/// reports them. Selection order is kept.
pub fn expand_paths<S: AsRef<str>>(paths: &[PathBuf], allowed: &[S]) -> Vec<PathBuf> {
    let mut expanded = Vec::with_capacity(paths.len());
    for path in paths {
        if !path.is_dir() {
            expanded.push(path.clone());
            continue;
        }
        match scan_directory(path, allowed) {
            Ok(files) => {
                if files.is_empty() {
                    tracing::info!("No media files found in {}", path.display());
                }
                expanded.extend(files);
            }
            Err(e) => {
                tracing::warn!("Failed to scan {}: {}", path.display(), e);
            }
        }
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_video_extension() {
        assert!(is_video_extension("mkv", DEFAULT_VIDEO_EXTENSIONS));
        assert!(is_video_extension("MKV", DEFAULT_VIDEO_EXTENSIONS));
        assert!(is_video_extension("mp4", DEFAULT_VIDEO_EXTENSIONS));
        assert!(is_video_extension("ts", DEFAULT_VIDEO_EXTENSIONS));
        assert!(!is_video_extension("txt", DEFAULT_VIDEO_EXTENSIONS));
        assert!(!is_video_extension("srt", DEFAULT_VIDEO_EXTENSIONS));
    }

    #[test]
    fn test_custom_extension_list() {
        let allowed = vec!["mkv".to_string()];
        assert!(is_video_extension("mkv", &allowed));
        assert!(!is_video_extension("mp4", &allowed));
    }

    #[test]
    fn test_has_video_extension() {
        assert!(has_video_extension(Path::new("/v/movie.MOV"), DEFAULT_VIDEO_EXTENSIONS));
        assert!(!has_video_extension(Path::new("/v/movie"), DEFAULT_VIDEO_EXTENSIONS));
        assert!(!has_video_extension(Path::new("/v/notes.txt"), DEFAULT_VIDEO_EXTENSIONS));
    }

    // Directory expansion tests live in tests/scanner_tests.rs
}
