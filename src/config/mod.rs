// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Configuration management for pdf-refile

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    /// External tool settings
    #[serde(default)]
    pub tools: ToolsConfig,

    /// What to do when OCR fails for a file
    #[serde(default)]
    pub on_ocr_failure: OcrFailurePolicy,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ToolsConfig {
    /// OCR executable, must produce a searchable PDF
    #[serde(default = "default_ocr")]
    pub ocr: String,
    /// Arguments placed before `<input> <output>`
    #[serde(default = "default_ocr_args")]
    pub ocr_args: Vec<String>,
    /// Text extraction executable, invoked as `<tool> <input> -`
    #[serde(default = "default_text_extract")]
    pub text_extract: String,
}

/// Batch behavior when the OCR tool exits unsuccessfully
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OcrFailurePolicy {
    /// Stop the whole run
    #[default]
    Abort,
    /// Log the failure and continue with the next file
    Skip,
}

// Default value functions
fn default_ocr() -> String { "ocrmypdf".to_string() }
fn default_text_extract() -> String { "pdftotext".to_string() }

fn default_ocr_args() -> Vec<String> {
    vec!["--skip-text", "--output-type", "pdf", "--quiet"]
        .into_iter().map(String::from).collect()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ocr: default_ocr(),
            ocr_args: default_ocr_args(),
            text_extract: default_text_extract(),
        }
    }
}

impl ToolsConfig {
    /// Executables that must be on PATH before any file is touched
    pub fn required(&self) -> Vec<&str> {
        vec![self.ocr.as_str(), self.text_extract.as_str()]
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| crate::RefileError::Config(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Write the default configuration as a starting point for editing.
    ///
    /// An existing file is never overwritten.
    pub fn write_starter(path: &Path) -> crate::Result<()> {
        if path.exists() {
            return Err(crate::RefileError::Config(format!(
                "Config file already exists: {:?}",
                path
            )));
        }
        Self::default().save(path)?;
        tracing::info!("Wrote default configuration to {:?}", path);
        Ok(())
    }
}
