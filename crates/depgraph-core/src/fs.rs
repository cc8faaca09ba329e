//! Filesystem seam for filters and scanning.
//!
//! The local-path filter only needs one question answered: does this path
//! denote a file right now? Putting that behind a trait keeps the graph
//! code pure and lets tests swap in a canned answer.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Answers existence questions about paths.
pub trait PathProbe {
    /// Returns `true` if `path` currently denotes a regular file.
    fn is_file(&self, path: &Path) -> bool;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl PathProbe for RealFs {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// A canned filesystem for tests: only the listed paths exist.
#[derive(Debug, Clone, Default)]
pub struct FakeFs {
    files: HashSet<PathBuf>,
}

impl FakeFs {
    pub fn with_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

impl PathProbe for FakeFs {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }
}
