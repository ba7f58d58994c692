// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

#![no_main]

use libfuzzer_sys::fuzz_target;
use pdf_refile::date::{parse_date, scan_text, stamp_from_filename};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    for stamp in [parse_date(input), scan_text(input)].into_iter().flatten() {
        assert_eq!(stamp.as_str().len(), 8);
        assert!(stamp.as_str().bytes().all(|b| b.is_ascii_digit()));
    }

    if let Some((stamp, _)) = stamp_from_filename(input) {
        assert_eq!(stamp.as_str().len(), 8);
    }
});
