//! `[bundle]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [bundle]
//! base_url = "/docs/assets"        # Public URL of `dest.bundle`
//! init = ["docs/scripts/analytics.js"]
//! script = "folio-bundle.js"
//! stylesheet = "folio-styles.css"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// URL under which pages link the artifacts.
    pub base_url: String,

    /// Script files concatenated at the top of the bundle, in order.
    pub init: Vec<PathBuf>,

    /// Script bundle file name (inside `dest.bundle`).
    pub script: String,

    /// Stylesheet file name (inside `dest.bundle`).
    pub stylesheet: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            base_url: "/docs/assets".into(),
            init: Vec::new(),
            script: "folio-bundle.js".into(),
            stylesheet: "folio-styles.css".into(),
        }
    }
}

impl BundleConfig {
    /// Public URL of a file inside the artifact directory.
    pub fn url_for(&self, file_name: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}/{file_name}")
    }
}
