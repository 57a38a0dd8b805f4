//! Open-dialog contract and the non-GUI dialogs shipped with the CLI.

use crate::core::scanner::{has_video_extension, DEFAULT_VIDEO_EXTENSIONS};
use crate::models::media::DialogSelection;
use crate::Result;
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// What the dialog lets the user pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogProperties {
    pub open_file: bool,
    pub open_directory: bool,
    pub multi_selections: bool,
}

impl Default for DialogProperties {
    fn default() -> Self {
        Self {
            open_file: true,
            open_directory: true,
            multi_selections: true,
        }
    }
}

/// A named extension filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

/// Options for one open-dialog invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDialogOptions {
    pub properties: DialogProperties,
    pub filters: Vec<FileFilter>,
}

impl OpenDialogOptions {
    /// Files, directories and multiple items, filtered to `extensions`.
    pub fn media_files<S: AsRef<str>>(extensions: &[S]) -> Self {
        Self {
            properties: DialogProperties::default(),
            filters: vec![FileFilter {
                name: "Media Files".to_string(),
                extensions: extensions.iter().map(|e| e.as_ref().to_string()).collect(),
            }],
        }
    }

    /// Check whether the dialog would offer `path`.
    ///
    /// Directories are governed by `open_directory` alone. Anything else is
    /// treated as a file and must match a filter, if any are set.
    pub fn accepts(&self, path: &Path) -> bool {
        if path.is_dir() {
            return self.properties.open_directory;
        }
        if !self.properties.open_file {
            return false;
        }
        self.filters.is_empty()
            || self
                .filters
                .iter()
                .any(|f| has_video_extension(path, &f.extensions))
    }

    /// Apply these options to raw candidate paths.
    pub fn select(&self, candidates: Vec<PathBuf>) -> DialogSelection {
        if candidates.is_empty() {
            return DialogSelection::cancelled();
        }

        let mut file_paths: Vec<PathBuf> = candidates
            .into_iter()
            .filter(|p| {
                let accepted = self.accepts(p);
                if !accepted {
                    tracing::info!("Skipping {}: not offered by the dialog", p.display());
                }
                accepted
            })
            .collect();

        if !self.properties.multi_selections {
            file_paths.truncate(1);
        }

        DialogSelection::new(file_paths)
    }
}

impl Default for OpenDialogOptions {
    fn default() -> Self {
        Self::media_files(DEFAULT_VIDEO_EXTENSIONS)
    }
}

/// The platform open dialog.
pub trait FileDialog {
    fn show_open_dialog(
        &self,
        options: &OpenDialogOptions,
    ) -> impl Future<Output = Result<DialogSelection>>;
}

/// Dialog answered up front by paths given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ArgsDialog {
    paths: Vec<PathBuf>,
}

impl ArgsDialog {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl FileDialog for ArgsDialog {
    async fn show_open_dialog(&self, options: &OpenDialogOptions) -> Result<DialogSelection> {
        Ok(options.select(self.paths.clone()))
    }
}

/// Dialog answered by newline-separated paths on standard input.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinDialog;

impl FileDialog for StdinDialog {
    async fn show_open_dialog(&self, options: &OpenDialogOptions) -> Result<DialogSelection> {
        let candidates = read_paths(BufReader::new(tokio::io::stdin())).await?;
        Ok(options.select(candidates))
    }
}

/// Read one path per line, skipping blank lines.
pub async fn read_paths<R: AsyncBufRead + Unpin>(reader: R) -> Result<Vec<PathBuf>> {
    let mut lines = reader.lines();
    let mut paths = Vec::new();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if !line.is_empty() {
            paths.push(PathBuf::from(line));
        }
    }
    Ok(paths)
}
