//! Media Probe CLI
//!
//! A command-line tool for selecting video files and inspecting their
//! metadata with ffprobe.

use clap::Parser;
use media_probe::cli::{
    args::{Cli, Commands},
    commands::{probe, select},
};
use media_probe::core::dialog::{ArgsDialog, StdinDialog};
use media_probe::core::selection::SelectionSession;
use media_probe::models::config;
use media_probe::preflight;
use media_probe::services::ffprobe::Ffprobe;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = config::load_config(cli.config.as_deref());
    let ffprobe = Ffprobe::from_config(&config.ffprobe, config::executable_dir().as_deref());
    tracing::info!("ffprobe: {}", ffprobe.binary().display());

    if let Commands::Check = cli.command {
        run_preflight_checks(&ffprobe)?;
        return Ok(());
    }

    // Run preflight checks unless skipped
    if !cli.skip_preflight {
        run_preflight_checks(&ffprobe)?;
    }

    match cli.command {
        Commands::Probe { paths, format } => {
            probe::probe_paths(&ffprobe, &paths, format).await?;
        }

        Commands::Select {
            paths,
            stdin,
            no_expand,
            format,
            output,
        } => {
            let mut selection_config = config.selection.clone();
            if no_expand {
                selection_config.expand_directories = false;
            }
            let mut session = SelectionSession::new(ffprobe, &selection_config);

            if stdin {
                select::select(&mut session, &StdinDialog, format, output.as_deref()).await?;
            } else {
                let dialog = ArgsDialog::new(paths);
                select::select(&mut session, &dialog, format, output.as_deref()).await?;
            }
        }

        Commands::Check => {}
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("media_probe=debug")
    } else {
        EnvFilter::new("media_probe=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
fn run_preflight_checks(ffprobe: &Ffprobe) -> anyhow::Result<()> {
    use colored::Colorize;

    eprintln!("{}", "Running preflight checks...".bold());

    let results = preflight::run_preflight_checks(ffprobe);
    preflight::print_results(&results);

    eprintln!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
