// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! PDF discovery in the scan directory

use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{RefileError, Result};

/// `*.pdf` files in `dir` (and below it when `recursive`), sorted by path.
///
/// The list is taken up front so files moved into a datetree under `dir`
/// are not picked up again.
pub fn find_pdfs(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let base = dir.to_str()
        .ok_or_else(|| RefileError::InvalidPath(dir.to_path_buf(), "scan directory is not valid UTF-8".into()))?;

    if !dir.is_dir() {
        return Err(RefileError::InvalidPath(dir.to_path_buf(), "scan directory does not exist".into()));
    }

    let base = Pattern::escape(base);
    let pattern = if recursive {
        format!("{}/**/*.pdf", base.trim_end_matches('/'))
    } else {
        format!("{}/*.pdf", base.trim_end_matches('/'))
    };
    debug!("Scanning with pattern {}", pattern);

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}
