//! `[title]` section configuration.

use serde::{Deserialize, Serialize};

/// Page title composition: `<page heading><connector><base>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    pub base: String,
    pub connector: String,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            base: "New Folio Project".into(),
            connector: " | ".into(),
        }
    }
}

impl TitleConfig {
    /// Compose the document title from the page's own heading, if any.
    pub fn compose(&self, heading: Option<&str>) -> String {
        match heading.map(str::trim).filter(|h| !h.is_empty()) {
            Some(heading) => format!("{heading}{}{}", self.connector, self.base),
            None => self.base.clone(),
        }
    }
}
