// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Date resolution: file name, then document text, then the user

use chrono::{DateTime, Local};
use std::fmt;
use std::path::Path;
use tracing::debug;

use super::{scan_text, stamp_from_filename, DateStamp};
use crate::prompt::DatePrompt;
use crate::tools::Toolchain;
use crate::{RefileError, Result};

/// Which strategy produced a date stamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    /// `YYYYMMDD-name.pdf`
    FilenamePrefix,
    /// `Scanned_YYYYMMDD-name.pdf`
    ScannerPrefix,
    /// `Kind - Party - Month DD, YYYY.pdf`
    DescriptiveName,
    /// First dated line of the OCR text layer
    OcrText,
    /// Typed or accepted at the prompt
    UserPrompt,
}

impl fmt::Display for DateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DateSource::FilenamePrefix => "file name prefix",
            DateSource::ScannerPrefix => "scanner file name",
            DateSource::DescriptiveName => "descriptive file name",
            DateSource::OcrText => "OCR text",
            DateSource::UserPrompt => "user input",
        };
        f.write_str(label)
    }
}

/// Work out the date stamp for `source`, whose searchable copy is `ocr_copy`.
///
/// Text is only extracted when the file name carries no date, and the user is
/// only asked when the text has none either.
pub async fn resolve(
    source: &Path,
    ocr_copy: &Path,
    tools: &Toolchain,
    prompt: &mut dyn DatePrompt,
) -> Result<(DateStamp, DateSource)> {
    // Undecodable bytes become U+FFFD, which the date patterns never need
    let name = source.file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();

    if let Some((stamp, from)) = stamp_from_filename(&name) {
        debug!("Date stamp extracted from {}: {}", from, stamp);
        return Ok((stamp, from));
    }

    let text = tools.extract_text(ocr_copy).await?;
    if let Some(stamp) = scan_text(&text) {
        debug!("Date stamp extracted from OCR text: {}", stamp);
        return Ok((stamp, DateSource::OcrText));
    }

    let suggested = suggested_stamp(source)?;
    let stamp = prompt.ask(source, &suggested).await?;
    debug!("Date stamp entered by user: {}", stamp);
    Ok((stamp, DateSource::UserPrompt))
}

/// Local creation date of a file, or its modification date where the
/// platform does not record creation
pub fn suggested_stamp(path: &Path) -> Result<DateStamp> {
    let metadata = std::fs::metadata(path)?;
    let time = metadata.created().or_else(|_| metadata.modified())?;
    let local: DateTime<Local> = time.into();

    DateStamp::from_date(local.date_naive())
        .ok_or_else(|| RefileError::InvalidDateStamp(local.format("%Y%m%d").to_string()))
}
