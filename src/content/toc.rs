//! Table of contents shared by every page of a build.

use std::io;
use std::path::Path;

use super::markdown::{MarkdownOptions, render};

/// Rendered navigation tree. Loaded once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toc {
    html: String,
}

impl Toc {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_markdown(markdown: &str, options: &MarkdownOptions) -> Self {
        Self {
            html: render(markdown, options).html,
        }
    }

    /// Load the ToC source at `path`.
    ///
    /// A missing file yields an empty ToC; other read failures are errors.
    pub async fn load(path: &Path, options: &MarkdownOptions) -> io::Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(markdown) => Ok(Self::from_markdown(&markdown, options)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                crate::log!("toc"; "{} not found, pages get an empty table of contents", path.display());
                Ok(Self::empty())
            }
            Err(e) => Err(e),
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}
