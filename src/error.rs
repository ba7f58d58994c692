// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Error types for pdf-refile

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdf-refile operations
pub type Result<T> = std::result::Result<T, RefileError>;

/// pdf-refile error types
#[derive(Error, Debug)]
pub enum RefileError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Directory scan error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Invalid path {0:?}: {1}")]
    InvalidPath(PathBuf, String),

    #[error("Required tool(s) not installed: {0}. Aborting.")]
    MissingDependency(String),

    #[error("OCR failed for {path:?} (exit status {status:?}): {stderr}")]
    OcrFailed {
        path: PathBuf,
        status: Option<i32>,
        stderr: String,
    },

    #[error("Invalid date stamp '{0}' (expected YYYYMMDD)")]
    InvalidDateStamp(String),

    #[error("Prompt error: {0}")]
    Prompt(String),
}
