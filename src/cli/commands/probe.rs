//! Probe command implementation.
//!
//! Runs ffprobe on the given paths without going through the dialog.

use crate::cli::args::OutputFormat;
use crate::cli::render;
use crate::core::report::ReportEntry;
use crate::core::selection::Summary;
use crate::models::media::{ProbeEntry, ProbeStatus};
use crate::services::ffprobe::Probe;
use crate::Result;
use std::path::PathBuf;

/// Probe every path concurrently and print the results in argument order.
pub async fn probe_paths<P: Probe>(prober: &P, paths: &[PathBuf], format: OutputFormat) -> Result<()> {
    let results = futures::future::join_all(paths.iter().map(|path| async move {
        let status = match prober.probe(path).await {
            Ok(meta) => ProbeStatus::Succeeded(meta),
            Err(e) => ProbeStatus::Failed(e),
        };
        ProbeEntry {
            path: path.clone(),
            status,
        }
    }))
    .await;

    match format {
        OutputFormat::Json => {
            let entries: Vec<ReportEntry> = results.iter().map(ReportEntry::from).collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            let mut summary = Summary {
                total: results.len(),
                ..Summary::default()
            };
            for entry in &results {
                println!("{}", render::entry_line(entry));
                match entry.status {
                    ProbeStatus::Succeeded(_) => summary.succeeded += 1,
                    ProbeStatus::Failed(_) => summary.failed += 1,
                    ProbeStatus::Pending => summary.pending += 1,
                }
            }
            println!();
            for line in render::summary_lines(&summary) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
