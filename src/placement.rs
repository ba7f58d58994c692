// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Datetree placement: `<root>/YYYY/MM/DD/<name>.pdf`

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::date::DateStamp;
use crate::{RefileError, Result};

/// `<root>/YYYY/MM/DD`
pub fn datetree_folder(root: &Path, stamp: &DateStamp) -> PathBuf {
    root.join(stamp.year()).join(stamp.month()).join(stamp.day())
}

/// First free name in `folder`: `name`, then `stem_1.ext`, `stem_2.ext`, ...
///
/// Names are handled as raw `OsStr` so bytes that are not UTF-8 survive.
pub fn unique_destination(folder: &Path, file_name: &OsStr) -> PathBuf {
    let candidate = folder.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let path = Path::new(file_name);
    let stem = path.file_stem().unwrap_or(file_name);
    let ext = path.extension().unwrap_or(OsStr::new("pdf"));

    (1u64..)
        .map(|counter| {
            let mut name = OsString::from(stem);
            name.push(format!("_{}.", counter));
            name.push(ext);
            folder.join(name)
        })
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

/// Move `ocr_copy` into the datetree under `root` and delete `source`.
///
/// Returns the destination. With `dry_run` the destination is only computed.
pub fn place(
    ocr_copy: &Path,
    source: &Path,
    root: &Path,
    stamp: &DateStamp,
    dry_run: bool,
) -> Result<PathBuf> {
    let folder = datetree_folder(root, stamp);
    let file_name = source.file_name()
        .ok_or_else(|| RefileError::InvalidPath(source.to_path_buf(), "no file name".into()))?;

    if dry_run {
        let destination = unique_destination(&folder, file_name);
        info!("DRY RUN: Would move processed file to {:?}", destination);
        return Ok(destination);
    }

    fs::create_dir_all(&folder)?;
    let destination = unique_destination(&folder, file_name);

    info!("Moving processed file to {:?}", destination);
    move_file(ocr_copy, &destination)?;
    fs::remove_file(source)?;

    Ok(destination)
}

/// Rename, falling back to copy + delete across filesystems
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) => {
            debug!("Rename {:?} -> {:?} failed ({}), copying instead", from, to, e);
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn stamp() -> DateStamp {
        DateStamp::parse("20240517").unwrap()
    }

    /// A source file and its OCR copy in separate directories
    fn fixture(dir: &Path, name: &str) -> (PathBuf, PathBuf) {
        let scans = dir.join("scans");
        let scratch = dir.join("scratch");
        fs::create_dir_all(&scans).unwrap();
        fs::create_dir_all(&scratch).unwrap();
        let source = scans.join(name);
        let copy = scratch.join(name);
        fs::write(&source, b"original").unwrap();
        fs::write(&copy, b"searchable").unwrap();
        (source, copy)
    }

    #[test]
    fn test_folder_layout() {
        assert_eq!(
            datetree_folder(Path::new("/archive"), &stamp()),
            PathBuf::from("/archive/2024/05/17")
        );
    }

    #[test]
    fn test_place_moves_copy_and_removes_source() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("dest");
        let (source, copy) = fixture(dir.path(), "foo.pdf");

        let placed = place(&copy, &source, &dest, &stamp(), false).unwrap();

        assert_eq!(placed, dest.join("2024/05/17/foo.pdf"));
        assert_eq!(fs::read(&placed).unwrap(), b"searchable");
        assert!(!source.exists());
        assert!(!copy.exists());
    }

    #[test]
    fn test_folder_creation_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("dest");

        let (source, copy) = fixture(dir.path(), "a.pdf");
        place(&copy, &source, &dest, &stamp(), false).unwrap();
        let (source, copy) = fixture(dir.path(), "b.pdf");
        place(&copy, &source, &dest, &stamp(), false).unwrap();

        assert!(dest.join("2024/05/17/a.pdf").exists());
        assert!(dest.join("2024/05/17/b.pdf").exists());
    }

    #[test]
    fn test_collisions_get_numeric_suffix() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("dest");

        let mut placed = Vec::new();
        for _ in 0..3 {
            let (source, copy) = fixture(dir.path(), "foo.pdf");
            placed.push(place(&copy, &source, &dest, &stamp(), false).unwrap());
        }

        let folder = dest.join("2024/05/17");
        assert_eq!(placed, vec![folder.join("foo.pdf"), folder.join("foo_1.pdf"), folder.join("foo_2.pdf")]);
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("dest");
        let (source, copy) = fixture(dir.path(), "foo.pdf");

        let would_be = place(&copy, &source, &dest, &stamp(), true).unwrap();

        assert_eq!(would_be, dest.join("2024/05/17/foo.pdf"));
        assert!(source.exists());
        assert!(copy.exists());
        assert!(!dest.exists());
    }

    #[test]
    fn test_unique_destination_without_extension() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes"), b"x").unwrap();

        assert_eq!(unique_destination(dir.path(), OsStr::new("notes")), dir.path().join("notes_1.pdf"));
    }

    #[test]
    fn test_source_without_file_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("dest");
        let (_, copy) = fixture(dir.path(), "foo.pdf");

        let result = place(&copy, Path::new("/"), &dest, &stamp(), false);

        assert!(matches!(result, Err(RefileError::InvalidPath(..))));
        assert!(copy.exists());
        assert!(!dest.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_undecodable_name_keeps_its_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("dest");
        let name = OsStr::from_bytes(b"scan\xff.pdf");

        let mut placed = Vec::new();
        for _ in 0..2 {
            let (source, copy) = fixture(dir.path(), "placeholder.pdf");
            let source_odd = source.with_file_name(name);
            fs::rename(&source, &source_odd).unwrap();
            placed.push(place(&copy, &source_odd, &dest, &stamp(), false).unwrap());
            assert!(!source_odd.exists());
        }

        let folder = dest.join("2024/05/17");
        assert_eq!(placed[0], folder.join(name));
        assert_eq!(placed[1], folder.join(OsStr::from_bytes(b"scan\xff_1.pdf")));
        assert!(placed.iter().all(|p| p.exists()));
    }
}
