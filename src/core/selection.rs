//! Selection session.
//!
//! Owns the view state of one selection screen: the latest dialog result and
//! one probe entry per selected path. Probes for a selection run
//! concurrently and settle in any order; each completion only touches its
//! own entry.

use crate::core::dialog::{FileDialog, OpenDialogOptions};
use crate::core::scanner;
use crate::models::config::SelectionConfig;
use crate::models::media::{DialogSelection, MediaMetadata, ProbeEntry, ProbeStatus};
use crate::services::ffprobe::Probe;
use crate::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::{Path, PathBuf};

/// Where a session is in its select/probe cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingDialog,
    Probing { remaining: usize },
    Settled,
}

/// Counts over the current entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub pending: usize,
}

/// View state for the selection screen.
pub struct SelectionSession<P> {
    prober: P,
    options: OpenDialogOptions,
    expand_directories: bool,
    state: SessionState,
    selection: Option<DialogSelection>,
    entries: Vec<ProbeEntry>,
    latest: Option<usize>,
}

impl<P: Probe> SelectionSession<P> {
    pub fn new(prober: P, config: &SelectionConfig) -> Self {
        Self {
            prober,
            options: OpenDialogOptions::media_files(&config.extensions),
            expand_directories: config.expand_directories,
            state: SessionState::Idle,
            selection: None,
            entries: Vec::new(),
            latest: None,
        }
    }

    pub fn options(&self) -> &OpenDialogOptions {
        &self.options
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The most recent dialog result.
    pub fn selection(&self) -> Option<&DialogSelection> {
        self.selection.as_ref()
    }

    /// Probe entries in selection order.
    pub fn entries(&self) -> &[ProbeEntry] {
        &self.entries
    }

    /// Status of the first entry probing `path`.
    pub fn status(&self, path: &Path) -> Option<&ProbeStatus> {
        self.entries
            .iter()
            .find(|e| e.path == path)
            .map(|e| &e.status)
    }

    /// Metadata from the most recently settled successful probe.
    pub fn latest(&self) -> Option<&MediaMetadata> {
        self.latest
            .and_then(|i| self.entries.get(i))
            .and_then(|e| e.status.metadata())
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            total: self.entries.len(),
            ..Summary::default()
        };
        for entry in &self.entries {
            match entry.status {
                ProbeStatus::Pending => summary.pending += 1,
                ProbeStatus::Succeeded(_) => summary.succeeded += 1,
                ProbeStatus::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// Open the dialog and probe everything selected.
    pub async fn on_select<D: FileDialog>(&mut self, dialog: &D) -> Result<()> {
        self.on_select_with(dialog, |_| {}).await
    }

    /// Like [`on_select`](Self::on_select), calling `on_settle` as each
    /// probe finishes.
    pub async fn on_select_with<D, F>(&mut self, dialog: &D, on_settle: F) -> Result<()>
    where
        D: FileDialog,
        F: FnMut(&ProbeEntry),
    {
        self.open_dialog(dialog).await?;
        self.probe_selection(on_settle).await;
        Ok(())
    }

    /// Open the dialog and replace the selection with its result.
    ///
    /// Every probe target starts out `Pending`; nothing runs until
    /// [`probe_selection`](Self::probe_selection).
    pub async fn open_dialog<D: FileDialog>(&mut self, dialog: &D) -> Result<&DialogSelection> {
        self.state = SessionState::AwaitingDialog;
        let selection = match dialog.show_open_dialog(&self.options).await {
            Ok(selection) => selection,
            Err(e) => {
                self.state = SessionState::Idle;
                return Err(e);
            }
        };
        tracing::debug!(
            "Dialog returned {} paths (canceled: {})",
            selection.file_paths.len(),
            selection.canceled
        );

        let targets = self.probe_targets(&selection);
        self.entries = targets.iter().map(|p| ProbeEntry::pending(p)).collect();
        self.latest = None;
        self.state = SessionState::Probing {
            remaining: self.entries.len(),
        };

        Ok(&*self.selection.insert(selection))
    }

    /// Probe every pending entry concurrently, in no particular order.
    pub async fn probe_selection<F>(&mut self, mut on_settle: F)
    where
        F: FnMut(&ProbeEntry),
    {
        let targets: Vec<(usize, PathBuf)> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.status.is_pending())
            .map(|(i, e)| (i, e.path.clone()))
            .collect();

        let prober = &self.prober;
        let mut in_flight: FuturesUnordered<_> = targets
            .iter()
            .map(|(index, path)| async move {
                tracing::debug!("Probing {}", path.display());
                (*index, prober.probe(path).await)
            })
            .collect();

        let mut remaining = targets.len();
        while let Some((index, result)) = in_flight.next().await {
            let entry = &mut self.entries[index];
            entry.status = match result {
                Ok(meta) => {
                    tracing::debug!("{}: {}", entry.path.display(), meta);
                    self.latest = Some(index);
                    ProbeStatus::Succeeded(meta)
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    ProbeStatus::Failed(e)
                }
            };
            remaining -= 1;
            self.state = SessionState::Probing { remaining };
            on_settle(entry);
        }

        self.state = SessionState::Settled;
    }

    fn probe_targets(&self, selection: &DialogSelection) -> Vec<PathBuf> {
        if self.expand_directories {
            scanner::expand_paths(&selection.file_paths, &self.options_extensions())
        } else {
            selection.file_paths.clone()
        }
    }

    fn options_extensions(&self) -> Vec<String> {
        self.options
            .filters
            .iter()
            .flat_map(|f| f.extensions.iter().cloned())
            .collect()
    }
}
