// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! The per-file pipeline (OCR, date, placement) and the batch loop around it

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::config::OcrFailurePolicy;
use crate::date::{self, DateSource, DateStamp};
use crate::placement;
use crate::prompt::DatePrompt;
use crate::scan;
use crate::shutdown::Shutdown;
use crate::tools::Toolchain;
use crate::{RefileError, Result};

/// Run-wide settings
#[derive(Debug, Clone)]
pub struct RefileOptions {
    /// Root of the datetree
    pub dest_dir: PathBuf,
    /// Compute and log destinations without moving or deleting anything
    pub dry_run: bool,
    pub on_ocr_failure: OcrFailurePolicy,
}

/// Where one file went
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub source: PathBuf,
    pub stamp: DateStamp,
    pub date_source: DateSource,
    pub destination: PathBuf,
    /// False in dry-run mode
    pub moved: bool,
}

/// Outcome of a batch
#[derive(Debug, Default)]
pub struct RunSummary {
    pub placed: Vec<Placement>,
    /// Files whose OCR failed under [`OcrFailurePolicy::Skip`]
    pub skipped: Vec<PathBuf>,
    /// Stopped early by a shutdown signal
    pub cancelled: bool,
}

impl RunSummary {
    /// User-facing outcome line, written whatever the log level
    pub fn write_outcome<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.cancelled {
            writeln!(out, "Exiting.")?;
        }
        out.flush()
    }
}

/// One whole invocation: where to look and how to file
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub scan_dir: PathBuf,
    /// Descend into subdirectories of `scan_dir`
    pub recursive: bool,
    pub options: RefileOptions,
}

/// Check tools, enumerate PDFs and process them.
///
/// Nothing is scanned or touched unless every required tool is present, and
/// a shutdown that arrives before processing starts ends the run cleanly.
pub async fn run_batch(
    tools: Toolchain,
    prompt: Box<dyn DatePrompt>,
    request: BatchRequest,
    shutdown: &mut Shutdown,
) -> Result<RunSummary> {
    tools.check_dependencies()?;
    debug!("Using {} for OCR, {} for text", tools.config().ocr, tools.config().text_extract);

    if request.options.dry_run {
        warn!("DRY RUN MODE - files will not be moved");
    }

    let files = scan::find_pdfs(&request.scan_dir, request.recursive)?;
    info!(
        "Found {} PDF file(s) in {}{}",
        files.len(),
        request.scan_dir.display(),
        if request.recursive { " (recursive)" } else { "" }
    );

    if shutdown.is_triggered() {
        return Ok(RunSummary { cancelled: true, ..Default::default() });
    }

    let mut refiler = Refiler::new(tools, prompt, request.options)?;
    let summary = refiler.run(&files, shutdown).await?;
    refiler.finish()?;

    Ok(summary)
}

/// Processes PDFs one at a time through a private scratch directory.
///
/// The scratch directory is removed when the refiler is dropped, whatever
/// state the batch ended in.
pub struct Refiler {
    tools: Toolchain,
    prompt: Box<dyn DatePrompt>,
    scratch: TempDir,
    options: RefileOptions,
}

impl Refiler {
    pub fn new(tools: Toolchain, prompt: Box<dyn DatePrompt>, options: RefileOptions) -> Result<Self> {
        let scratch = tempfile::Builder::new()
            .prefix("pdf-refile-")
            .tempdir()?;
        debug!("Scratch directory: {:?}", scratch.path());

        Ok(Self { tools, prompt, scratch, options })
    }

    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }

    /// OCR `source` into scratch, date it, and file the searchable copy
    pub async fn process_file(&mut self, source: &Path) -> Result<Placement> {
        info!("Processing {}...", source.display());

        let file_name = source.file_name()
            .ok_or_else(|| RefileError::InvalidPath(source.to_path_buf(), "no file name".into()))?;
        let ocr_copy = self.scratch.path().join(file_name);

        self.tools.ocr(source, &ocr_copy).await?;

        let (stamp, date_source) =
            date::resolve(source, &ocr_copy, &self.tools, self.prompt.as_mut()).await?;
        info!("Date stamp {} (from {})", stamp, date_source);

        let destination = placement::place(
            &ocr_copy,
            source,
            &self.options.dest_dir,
            &stamp,
            self.options.dry_run,
        )?;

        Ok(Placement {
            source: source.to_path_buf(),
            stamp,
            date_source,
            destination,
            moved: !self.options.dry_run,
        })
    }

    /// Process `files` in order until done, cancelled, or a fatal error.
    ///
    /// Files already moved stay moved when the batch stops early.
    pub async fn run(&mut self, files: &[PathBuf], shutdown: &mut Shutdown) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for file in files {
            if shutdown.is_triggered() {
                summary.cancelled = true;
                break;
            }

            let outcome = tokio::select! {
                result = self.process_file(file) => Some(result),
                _ = shutdown.triggered() => None,
            };

            let result = match outcome {
                Some(result) => result,
                None => {
                    warn!("Abandoning {:?}", file);
                    summary.cancelled = true;
                    break;
                }
            };

            match result {
                Ok(placement) => summary.placed.push(placement),
                Err(e @ RefileError::OcrFailed { .. })
                    if self.options.on_ocr_failure == OcrFailurePolicy::Skip =>
                {
                    warn!("Skipping {:?}: {}", file, e);
                    summary.skipped.push(file.clone());
                }
                Err(e) => return Err(e),
            }
        }

        Ok(summary)
    }

    /// Remove the scratch directory, reporting any failure to do so
    pub fn finish(self) -> Result<()> {
        self.scratch.close()?;
        Ok(())
    }
}
