// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! pdf-refile: searchable-PDF datetree organizer
//!
//! Runs OCR over scanned PDF files, works out a YYYYMMDD date stamp for each
//! (file name, then document text, then the user), and moves the searchable
//! copy into a `YYYY/MM/DD` folder tree.

pub mod config;
pub mod date;
pub mod error;
pub mod logging;
pub mod placement;
pub mod prompt;
pub mod refile;
pub mod scan;
pub mod shutdown;
pub mod tools;

pub use config::AppConfig;
pub use date::DateStamp;
pub use error::{RefileError, Result};
