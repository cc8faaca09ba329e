//! Locating unit files on disk.
//!
//! Each input path is either a unit file itself or a directory to walk
//! recursively for `*.unit` files. Inputs that are neither are logged and
//! skipped, as are unreadable directories — discovery is best-effort, the
//! caller decides whether finding nothing is fatal.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::manifest::{self, UNIT_EXTENSION};
use crate::unit::UnitInfo;

/// Returns `true` if `path` ends in the unit extension.
pub fn has_unit_extension(path: &Path) -> bool {
    path.extension() == Some(OsStr::new(UNIT_EXTENSION))
}

/// Collect unit files from a mix of file and directory paths.
///
/// The result is sorted and deduplicated, so overlapping inputs (a file
/// plus its parent directory) yield each unit once.
pub fn find_units(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for path in paths {
        if path.is_dir() {
            scan_dir(path, &mut found);
        } else if has_unit_extension(path) && path.is_file() {
            found.push(path.clone());
        } else {
            warn!(path = %path.display(), "not a unit file or directory, skipping");
        }
    }
    found.sort_unstable();
    found.dedup();
    debug!(count = found.len(), "discovered unit files");
    found
}

fn scan_dir(dir: &Path, found: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(dir = %dir.display(), error = %err, "cannot read directory, skipping");
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            scan_dir(&path, found);
        } else if has_unit_extension(&path) {
            found.push(path);
        }
    }
}

/// Parse every discovered unit file, skipping the ones that fail.
///
/// Parse failures are warnings, not errors: one broken manifest should not
/// hide the rest of the tree from the graph.
pub fn load_units(files: &[PathBuf]) -> Vec<UnitInfo> {
    let mut units = Vec::with_capacity(files.len());
    for file in files {
        match manifest::load_unit(file) {
            Ok(unit) => units.push(unit),
            Err(err) => {
                warn!(path = %file.display(), error = %err, "skipping unparsable unit file");
            }
        }
    }
    units
}
