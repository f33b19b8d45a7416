//! `[nav]` section configuration for soft navigation.
//!
//! # Example
//!
//! ```toml
//! [nav]
//! container = "-folio-container"
//! toc = "-folio-toc"
//! ```

use serde::{Deserialize, Serialize};

/// Element ids shared by the page layout and the navigation runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Id of the element whose content is swapped on navigation.
    pub container: String,

    /// Id of the table-of-contents element.
    pub toc: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            container: "-folio-container".into(),
            toc: "-folio-toc".into(),
        }
    }
}
