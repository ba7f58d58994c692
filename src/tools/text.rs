// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Plain text extraction from a searchable PDF

use std::path::Path;
use tracing::warn;

use super::{Invocation, Toolchain};
use crate::config::ToolsConfig;
use crate::Result;

/// `<extract> <input> -` (text on stdout)
pub fn text_invocation(config: &ToolsConfig, input: &Path) -> Invocation {
    Invocation::new(config.text_extract.as_str())
        .arg(input)
        .arg("-")
}

impl Toolchain {
    /// Text layer of `pdf`; empty when the extractor exits unsuccessfully
    pub async fn extract_text(&self, pdf: &Path) -> Result<String> {
        let result = self.runner.run(&text_invocation(&self.config, pdf)).await?;

        if !result.success() {
            warn!(
                "{} exited with {:?} for {:?}: {}",
                self.config.text_extract,
                result.status,
                pdf,
                result.stderr_lossy()
            );
            return Ok(String::new());
        }

        Ok(String::from_utf8_lossy(&result.stdout).into_owned())
    }
}
