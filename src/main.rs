// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! pdf-refile: searchable-PDF datetree organizer
//!
//! Runs OCR on every PDF in the scan directory, works out a date stamp for
//! each and moves the searchable copy to `<dest>/YYYY/MM/DD/`.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

use pdf_refile::config::{AppConfig, OcrFailurePolicy};
use pdf_refile::logging::{self, LogLevel};
use pdf_refile::prompt::InteractivePrompt;
use pdf_refile::refile::{self, BatchRequest, RefileOptions};
use pdf_refile::shutdown::Shutdown;
use pdf_refile::tools::{SystemRunner, Toolchain};

/// pdf-refile CLI
#[derive(Parser, Debug)]
#[command(name = "pdf-refile")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version)]
#[command(about = "Organizes scanned PDF files into a searchable datetree folder structure.", long_about = None)]
struct Cli {
    /// Directory to scan for PDF files (default: current directory, scanned recursively when given)
    #[arg(short = 's', long = "scan_dir", alias = "scan-dir")]
    scan_dir: Option<PathBuf>,

    /// Destination directory for organized PDF files (default: current directory)
    #[arg(short = 'd', long = "dest_dir", alias = "dest-dir")]
    dest_dir: Option<PathBuf>,

    /// Log level
    #[arg(short = 'l', long = "log_level", alias = "log-level", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Dry-run mode. Do not move files, just print the date stamp and destination.
    #[arg(short = 'n', long = "dry_run", alias = "dry-run")]
    dry_run: bool,

    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "pdf-refile.json")]
    config: PathBuf,

    /// What to do when OCR fails for a file (overrides the config file)
    #[arg(long = "on_ocr_failure", alias = "on-ocr-failure", value_enum)]
    on_ocr_failure: Option<OcrFailurePolicy>,

    /// Write a default configuration file at the --config path and exit
    #[arg(long = "init_config", alias = "init-config")]
    init_config: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_level);

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(run(cli));
    // A pending prompt read holds a blocking-pool thread; don't wait on it.
    runtime.shutdown_background();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.init_config {
        AppConfig::write_starter(&cli.config)?;
        return Ok(());
    }

    // Installed first so a signal during startup still ends the run cleanly
    let mut shutdown = Shutdown::listen_for_signals();

    let config = AppConfig::load(&cli.config)?;
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    let recursive = cli.scan_dir.is_some();
    let request = BatchRequest {
        scan_dir: cli.scan_dir.unwrap_or_else(|| cwd.clone()),
        recursive,
        options: RefileOptions {
            dest_dir: cli.dest_dir.unwrap_or(cwd),
            dry_run: cli.dry_run,
            on_ocr_failure: cli.on_ocr_failure.unwrap_or(config.on_ocr_failure),
        },
    };

    let tools = Toolchain::new(Arc::new(SystemRunner), config.tools.clone());
    let summary = refile::run_batch(
        tools,
        Box::new(InteractivePrompt::terminal()),
        request,
        &mut shutdown,
    ).await?;

    summary.write_outcome(&mut std::io::stdout().lock())
        .context("Failed to write to stdout")?;
    if !summary.skipped.is_empty() {
        warn!("Skipped {} file(s) after OCR failure: {:?}", summary.skipped.len(), summary.skipped);
    }
    info!(
        "{} {} file(s)",
        if cli.dry_run { "Would have filed" } else { "Filed" },
        summary.placed.len()
    );

    Ok(())
}
