use serde_json::Value;
use std::time::Duration;

use super::Timer;

/// Dispatched when a soft navigation starts.
pub const NAVIGATION_START: &str = "navigation-start";

/// Dispatched once the new content is visible.
pub const NAVIGATION: &str = "navigation";

/// Side effects requested by the navigator, executed by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEffect {
    /// Suppress the browser's default link navigation.
    PreventDefault,
    /// Collapse the table of contents on narrow viewports.
    CollapseToc,
    /// Container opacity to 0.
    FadeOut,
    /// Container opacity back to 1.
    FadeIn,
    PushHistory { url: String },
    /// Custom event on the global event target.
    Dispatch { name: &'static str, detail: Value },
    Fetch { url: String, generation: u64 },
    SetTitle { title: String },
    Schedule { delay: Duration, timer: Timer },
    /// Replace the container's inner HTML.
    ReplaceContent { html: String },
    /// Execute an inline script from the swapped content, once.
    RunScript { source: String },
    /// Regular document navigation.
    FullLoad { url: String },
}

impl NavEffect {
    pub(super) fn dispatch(name: &'static str, url: &str) -> Self {
        Self::Dispatch {
            name,
            detail: serde_json::json!({ "url": url }),
        }
    }
}
