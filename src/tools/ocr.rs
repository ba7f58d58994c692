// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! OCR pass producing a searchable copy

use std::path::Path;
use tracing::debug;

use super::{Invocation, Toolchain};
use crate::config::ToolsConfig;
use crate::{RefileError, Result};

/// `<ocr> <ocr_args..> <input> <output>`
pub fn ocr_invocation(config: &ToolsConfig, input: &Path, output: &Path) -> Invocation {
    Invocation::new(config.ocr.as_str())
        .args(config.ocr_args.iter().map(String::as_str))
        .arg(input)
        .arg(output)
}

impl Toolchain {
    /// Write a searchable copy of `input` to `output`.
    ///
    /// Pages that already carry text are left alone (`--skip-text`).
    pub async fn ocr(&self, input: &Path, output: &Path) -> Result<()> {
        let invocation = ocr_invocation(&self.config, input, output);
        let result = self.runner.run(&invocation).await?;

        if !result.success() {
            return Err(RefileError::OcrFailed {
                path: input.to_path_buf(),
                status: result.status,
                stderr: result.stderr_lossy(),
            });
        }

        debug!("OCR copy written to {:?}", output);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::tests::FakeRunner;
    use std::ffi::OsString;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_command_line() {
        let inv = ocr_invocation(
            &ToolsConfig::default(),
            Path::new("/scans/a.pdf"),
            Path::new("/tmp/scratch/a.pdf"),
        );

        assert_eq!(inv.program, "ocrmypdf");
        let args: Vec<OsString> = ["--skip-text", "--output-type", "pdf", "--quiet", "/scans/a.pdf", "/tmp/scratch/a.pdf"]
            .iter()
            .map(OsString::from)
            .collect();
        assert_eq!(inv.args, args);
    }

    #[tokio::test]
    async fn test_ocr_writes_copy() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("a.pdf");
        let output = dir.path().join("a.ocr.pdf");
        std::fs::write(&input, b"%PDF-1.4").unwrap();

        let tools = Toolchain::new(Arc::new(FakeRunner::new()), ToolsConfig::default());
        tokio_test::assert_ok!(tools.ocr(&input, &output).await);
        assert!(output.exists());
    }

    #[tokio::test]
    async fn test_ocr_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.pdf");
        std::fs::write(&input, b"garbage").unwrap();

        let runner = FakeRunner::new().failing_ocr_for("broken.pdf");
        let tools = Toolchain::new(Arc::new(runner), ToolsConfig::default());

        match tools.ocr(&input, &dir.path().join("out.pdf")).await {
            Err(RefileError::OcrFailed { path, status, stderr }) => {
                assert_eq!(path, input);
                assert_eq!(status, Some(2));
                assert!(stderr.contains("not a PDF"));
            }
            other => panic!("Expected OcrFailed, got {:?}", other),
        }
    }
}
