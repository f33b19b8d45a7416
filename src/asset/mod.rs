//! Site-wide artifacts: the script bundle and the stylesheet.
//!
//! Both are fed by every file task through write-only sinks while the
//! build runs, then sealed and flushed exactly once.

mod accumulator;
mod bundle;
pub mod minify;
mod style;

use futures_util::future::BoxFuture;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use accumulator::{Accumulator, Sealed};
pub use bundle::{BundleSink, ScriptBundle};
pub use style::{StyleSheet, StyleSink};

/// Errors raised while flushing a sealed artifact. Fatal to the build.
#[derive(Debug, Error)]
pub enum FlushError {
    #[error("failed to read bundle init script `{0}`")]
    Init(PathBuf, #[source] io::Error),

    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] io::Error),
}

/// An artifact that is sealed and written once all file tasks settle.
pub trait Flush: Send + Sync {
    /// Output path, used for progress lines.
    fn path(&self) -> &Path;

    /// Seal the accumulator and persist the artifact.
    fn flush(&self) -> BoxFuture<'_, Result<(), FlushError>>;
}

/// Write `content` to `path`, creating parent directories.
pub(crate) async fn write_artifact(path: &Path, content: &str) -> Result<(), FlushError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| FlushError::Write(path.to_path_buf(), e))?;
    }
    tokio::fs::write(path, content)
        .await
        .map_err(|e| FlushError::Write(path.to_path_buf(), e))
}
