//! setsplit CLI entry point

use clap::Parser;
use setsplit::config::{Cli, Settings};
use setsplit::media::Ffmpeg;
use setsplit::pipeline::{self, CancellationToken};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli);

    // Build settings from CLI
    let settings = Settings::from_cli(&cli);

    // Validate inputs
    if let Err(e) = settings.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    // Ctrl+C / SIGTERM stop new tracks from starting and kill running ffmpeg
    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received interrupt signal, cleaning up...");
        handler_token.cancel();
    }) {
        warn!("Failed to install interrupt handler: {}", e);
    }

    let tool = Ffmpeg::new(&settings.ffmpeg, &settings.ffprobe);

    // Run the pipeline
    match pipeline::run(&settings, &tool, &cancel, pipeline::prompt_delete) {
        Ok(result) => {
            if !settings.dry_run {
                println!();
                println!(
                    "Summary: {} extracted, {} failed, {} skipped (of {} total)",
                    result.succeeded, result.failed, result.skipped, result.total
                );
            }

            // Per-track failures are reported above but don't fail the run
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let filter = cli.log_level().to_string().to_lowercase();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
