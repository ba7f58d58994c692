// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Date stamps carried in file names

use regex::Regex;
use std::sync::OnceLock;

use super::{parse_date, DateSource, DateStamp};

/// `20240517-anything.pdf` or `20240517_anything.pdf`
fn prefix_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]{8})[_-].*\.pdf$").expect("valid regex"))
}

/// Scanner apps name their output `Scanned_20240517-anything.pdf`
fn scanned_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Scanned_([0-9]{8})[_-].*\.pdf$").expect("valid regex"))
}

/// `Receipt - CVS - May 17, 2024.pdf`
fn descriptive_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^.*\s-\s.*\s-\s([A-Za-z]+\s[0-9]{1,2},\s[0-9]{4})\.pdf$").expect("valid regex")
    })
}

/// Try the file name strategies in priority order
pub fn stamp_from_filename(name: &str) -> Option<(DateStamp, DateSource)> {
    if let Some(caps) = prefix_pattern().captures(name) {
        let stamp = DateStamp::parse(&caps[1]).ok()?;
        return Some((stamp, DateSource::FilenamePrefix));
    }

    if let Some(caps) = scanned_pattern().captures(name) {
        let stamp = DateStamp::parse(&caps[1]).ok()?;
        return Some((stamp, DateSource::ScannerPrefix));
    }

    if let Some(caps) = descriptive_pattern().captures(name) {
        return parse_date(&caps[1]).map(|stamp| (stamp, DateSource::DescriptiveName));
    }

    None
}
