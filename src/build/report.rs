//! Build outcome.

use std::path::PathBuf;

use super::{BuildError, FileError};

/// A file task that settled with an error.
#[derive(Debug)]
pub struct FileFailure {
    /// Source path of the file.
    pub path: PathBuf,
    pub error: FileError,
}

/// Everything a completed build produced. Sorted by path.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
    /// Script bundle and stylesheet, once flushed.
    pub artifacts: Vec<PathBuf>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of admitted files, settled either way.
    pub fn settled(&self) -> usize {
        self.pages.len() + self.failures.len()
    }

    /// Turn per-file failures into an error.
    pub fn into_result(self) -> Result<Self, BuildError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(BuildError::Files {
            failed: self.failures.into_iter().map(|f| f.path).collect(),
        })
    }

    pub(crate) fn sort(&mut self) {
        self.pages.sort();
        self.failures.sort_by(|a, b| a.path.cmp(&b.path));
    }
}
