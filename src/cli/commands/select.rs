//! Select command implementation.
//!
//! Opens the selection dialog, prints the dialog result, then probes every
//! selected path and prints each result as it arrives.

use crate::cli::args::OutputFormat;
use crate::cli::render;
use crate::core::dialog::FileDialog;
use crate::core::report::{self, Report};
use crate::core::selection::SelectionSession;
use crate::services::ffprobe::Probe;
use crate::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Run one select/probe cycle.
pub async fn select<P: Probe, D: FileDialog>(
    session: &mut SelectionSession<P>,
    dialog: &D,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            session.on_select(dialog).await?;
            let report = Report::from_session(session);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("{}", "Select media files...".bold().cyan());
            println!();

            let selection = session.open_dialog(dialog).await?;
            for line in render::selection_lines(selection) {
                println!("{}", line);
            }
            println!();

            let total = session.entries().len();
            if total == 0 {
                println!("No media files to probe.");
            } else {
                let pb = ProgressBar::new(total as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                        .map_err(|e| crate::Error::other(e.to_string()))?
                        .progress_chars("█▓░"),
                );
                pb.set_message("Probing...");

                session
                    .probe_selection(|entry| {
                        pb.println(render::entry_line(entry));
                        pb.inc(1);
                    })
                    .await;

                pb.finish_and_clear();
                println!();
                for line in render::summary_lines(&session.summary()) {
                    println!("{}", line);
                }
            }
        }
    }

    if let Some(path) = output {
        let report = Report::from_session(session);
        report::save_report(&report, path)?;
        if format == OutputFormat::Text {
            println!(
                "{} {}",
                "[OK] Report saved to:".bold().green(),
                path.display()
            );
        }
    }

    Ok(())
}
