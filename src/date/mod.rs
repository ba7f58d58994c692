// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Date stamps and the date formats recognized in file names and text

pub mod filename;
pub mod resolver;

use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::{RefileError, Result};

pub use filename::stamp_from_filename;
pub use resolver::{resolve, DateSource};

/// Accepted date layouts, tried in this order, each paired with the shape a
/// line must have before chrono parses it.
///
/// The shape pins the year to four digits; chrono alone reads `1.2.3` as
/// year 1. Numeric day/month layouts are ambiguous for strings like
/// `05/06/2024`; the first layout that parses wins.
pub const DATE_LAYOUTS: [(&str, &str); 8] = [
    ("%Y/%m/%d", r"^[0-9]{4}/[0-9]{1,2}/[0-9]{1,2}$"),
    ("%Y-%m-%d", r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$"),
    ("%Y.%m.%d", r"^[0-9]{4}\.[0-9]{1,2}\.[0-9]{1,2}$"),
    ("%d/%m/%Y", r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}$"),
    ("%d-%m-%Y", r"^[0-9]{1,2}-[0-9]{1,2}-[0-9]{4}$"),
    ("%d.%m.%Y", r"^[0-9]{1,2}\.[0-9]{1,2}\.[0-9]{4}$"),
    ("%B %d, %Y", r"^[A-Za-z]+\s+[0-9]{1,2},\s+[0-9]{4}$"),
    ("%b %d, %Y", r"^[A-Za-z]+\s+[0-9]{1,2},\s+[0-9]{4}$"),
];

fn layout_shapes() -> &'static [Regex] {
    static SHAPES: OnceLock<Vec<Regex>> = OnceLock::new();
    SHAPES.get_or_init(|| {
        DATE_LAYOUTS.iter()
            .map(|(_, shape)| Regex::new(shape).expect("valid regex"))
            .collect()
    })
}

/// An eight digit `YYYYMMDD` stamp.
///
/// Only the shape is checked, not the calendar: `20241399` is a valid stamp
/// and files into `2024/13/99`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateStamp(String);

impl DateStamp {
    /// Accept a string of exactly eight ASCII digits
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(RefileError::InvalidDateStamp(raw.to_string()))
        }
    }

    pub fn from_date(date: NaiveDate) -> Option<Self> {
        Self::parse(&date.format("%Y%m%d").to_string()).ok()
    }

    pub fn year(&self) -> &str {
        &self.0[0..4]
    }

    pub fn month(&self) -> &str {
        &self.0[4..6]
    }

    pub fn day(&self) -> &str {
        &self.0[6..8]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a whole line as a date in one of [`DATE_LAYOUTS`]
pub fn parse_date(line: &str) -> Option<DateStamp> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    DATE_LAYOUTS.iter()
        .zip(layout_shapes())
        .filter(|(_, shape)| shape.is_match(line))
        .find_map(|((format, _), _)| NaiveDate::parse_from_str(line, format).ok())
        .and_then(DateStamp::from_date)
}

/// First line of `text`, in document order, that parses as a date
pub fn scan_text(text: &str) -> Option<DateStamp> {
    text.lines().find_map(parse_date)
}
