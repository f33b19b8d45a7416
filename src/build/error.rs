//! Build error types.

use std::error::Error as StdError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::asset::FlushError;
use crate::content::TransformError;

/// Failure of a single file task. Never aborts sibling files.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to read `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to compile `{path}`")]
    Transform {
        path: PathBuf,
        #[source]
        source: TransformError,
    },

    #[error("hook `{hook}` failed on `{path}`")]
    Hook {
        path: PathBuf,
        hook: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to write `{path}`")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    /// The file the error belongs to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. }
            | Self::Transform { path, .. }
            | Self::Hook { path, .. }
            | Self::Write { path, .. } => path,
        }
    }
}

/// Whole-build failure.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to load table of contents `{0}`")]
    Toc(PathBuf, #[source] io::Error),

    #[error(transparent)]
    Flush(#[from] FlushError),

    #[error("{} file(s) failed to build", .failed.len())]
    Files { failed: Vec<PathBuf> },
}

/// `error: cause: cause` rendering of an error and its sources.
pub fn display_chain(err: &dyn StdError) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
