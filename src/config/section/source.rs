//! `[src]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [src]
//! base = "docs/md"          # Source root (relative to project root)
//! toc = "_toc.md"           # Table of contents file (relative to base)
//! pick = '\.md$'            # Files to build
//! drop = '(^_)|(/_)'        # Files to skip, even if picked
//! ```

use crate::config::{ConfigDiagnostics, FieldPath, Pattern};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Source root directory.
    pub base: PathBuf,

    /// Table of contents file, relative to `base`.
    pub toc: PathBuf,

    /// Inclusion pattern, matched against the `/`-separated relative path.
    pub pick: Pattern,

    /// Exclusion pattern, evaluated after `pick`.
    pub drop: Pattern,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base: "docs/md".into(),
            toc: "_toc.md".into(),
            pick: default_pattern(r"\.md$"),
            drop: default_pattern(r"(^_)|(/_)"),
        }
    }
}

fn default_pattern(source: &str) -> Pattern {
    Pattern::new(source).expect("default pattern compiles")
}

impl SourceConfig {
    /// Whether a relative source path is admitted by `pick` and not `drop`.
    pub fn admits(&self, relative: &str) -> bool {
        self.pick.is_match(relative) && !self.drop.is_match(relative)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.base.is_dir() {
            diag.error_with_hint(
                FieldPath::new("src.base"),
                format!("source directory '{}' not found", self.base.display()),
                "create it or point `src.base` at your markdown files",
            );
        }
    }
}
