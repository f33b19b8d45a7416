//! Content collaborator boundary.
//!
//! The build orchestrator only knows the [`ContentBuilder`] trait: raw file
//! text in, [`CompiledDocument`] out. [`MarkdownBuilder`] is the builder the
//! binary ships with.
//!
//! # Module Structure
//!
//! ```text
//! content/
//! ├── components.rs  # Style rules and scripts registered by pages
//! ├── document.rs    # CompiledDocument and its HTML rendering
//! ├── markdown/      # Default markdown builder
//! ├── meta.rs        # Page-specific meta overrides
//! ├── namespace.rs   # Root-relative link prefixing
//! └── toc.rs         # Shared table of contents
//! ```

pub mod components;
mod document;
pub mod markdown;
pub mod meta;
pub mod namespace;
mod toc;

pub use document::{CompiledDocument, Meta, Script};
pub use markdown::{MarkdownBuilder, MarkdownOptions};
pub use toc::Toc;

use crate::asset::StyleSink;
use crate::config::SiteConfig;
use futures_util::future::BoxFuture;
use std::path::Path;
use thiserror::Error;

/// Errors raised by a content builder for a single file.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("malformed meta override on line {line}: {reason}")]
    MetaOverride { line: usize, reason: &'static str },

    #[error("{0}")]
    Other(String),
}

/// Everything a builder may consult while compiling one file.
#[derive(Clone, Copy)]
pub struct TransformContext<'a> {
    /// Source path relative to `src.base`.
    pub path: &'a Path,
    /// Table of contents shared by every file of the build.
    pub toc: &'a Toc,
    pub config: &'a SiteConfig,
    /// Style rules requested by the page go here.
    pub styles: &'a StyleSink,
}

/// Turns raw source text into a compiled document.
///
/// Implementations must not retain `ctx` beyond the returned future.
pub trait ContentBuilder: Send + Sync {
    fn build<'a>(
        &'a self,
        content: &'a str,
        ctx: TransformContext<'a>,
    ) -> BoxFuture<'a, Result<CompiledDocument, TransformError>>;
}
