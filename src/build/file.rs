//! In-flight file payload.

use std::path::{Path, PathBuf};

/// A file moving through the pipeline: `(root, path, content)`.
///
/// `path` stays relative to `root`; the last stages swap the extension and
/// the root so `root.join(path)` becomes the output location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineFile<T> {
    pub root: PathBuf,
    pub path: PathBuf,
    pub content: T,
}

/// An enumerated source file, not yet read.
pub type SourceFile = PipelineFile<()>;

impl<T> PipelineFile<T> {
    pub fn new(root: PathBuf, path: PathBuf, content: T) -> Self {
        Self {
            root,
            path,
            content,
        }
    }

    pub fn full_path(&self) -> PathBuf {
        self.root.join(&self.path)
    }

    /// Replace the payload, keeping the location.
    pub fn with_content<U>(self, content: U) -> PipelineFile<U> {
        PipelineFile {
            root: self.root,
            path: self.path,
            content,
        }
    }

    pub fn map_ext(mut self, ext: &str) -> Self {
        self.path.set_extension(ext);
        self
    }

    pub fn map_root(mut self, root: &Path) -> Self {
        self.root = root.to_path_buf();
        self
    }
}
