//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! minify = true   # Minify the script bundle and stylesheet
//! jobs = 16       # Max file tasks in flight
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Minify the flushed artifacts.
    pub minify: bool,

    /// Upper bound on overlapping file tasks.
    pub jobs: usize,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            minify: true,
            jobs: 16,
        }
    }
}

impl BuildSectionConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.jobs == 0 {
            diag.error_with_hint(
                FieldPath::new("build.jobs"),
                "must be at least 1",
                "remove the field to use the default (16)",
            );
        }
    }
}
