//! `[dest]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [dest]
//! html = "."                # Root for compiled pages
//! bundle = "docs/assets"    # Directory for the script bundle and stylesheet
//! namespace = "/my-project" # Prefix for root-relative links (subpath hosting)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DestConfig {
    /// Output root for compiled pages.
    pub html: PathBuf,

    /// Output directory for the site-wide artifacts.
    pub bundle: PathBuf,

    /// URL prefix applied to root-relative links. Empty disables rewriting.
    pub namespace: String,
}

impl Default for DestConfig {
    fn default() -> Self {
        Self {
            html: ".".into(),
            bundle: "docs/assets".into(),
            namespace: String::new(),
        }
    }
}

impl DestConfig {
    /// Namespace normalized to `/segment[/segment]`, or `None` when unset.
    ///
    /// - `""` -> `None`
    /// - `"docs"` -> `Some("/docs")`
    /// - `"/a/b/"` -> `Some("/a/b")`
    pub fn namespace_prefix(&self) -> Option<String> {
        let parts: Vec<_> = self
            .namespace
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(format!("/{}", parts.join("/")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_namespace(ns: &str) -> DestConfig {
        DestConfig {
            namespace: ns.into(),
            ..DestConfig::default()
        }
    }

    #[test]
    fn test_namespace_prefix() {
        assert_eq!(with_namespace("").namespace_prefix(), None);
        assert_eq!(with_namespace("/").namespace_prefix(), None);
        assert_eq!(with_namespace("docs").namespace_prefix(), Some("/docs".into()));
        assert_eq!(with_namespace("/a/b/").namespace_prefix(), Some("/a/b".into()));
    }
}
