//! Soft navigation for built sites.
//!
//! In-site link clicks and history moves swap the content container of
//! the current page instead of loading a new document.
//!
//! The logic is a pure reducer ([`Navigator::update`]) that maps events to
//! effects; [`NavRuntime`] feeds it host events and executes the effects
//! against a [`NavHost`] (the browser glue, or a recording double in tests).
//!
//! ```text
//! idle --click--> fetching --fetch ok--> swapping --fade-in--> idle
//!   ^                |  (stale generations discarded)
//!   +---popstate-----+
//! ```

mod effect;
mod env;
mod event;
mod link;
mod page;
mod runtime;
mod state;

pub use effect::{NAVIGATION, NAVIGATION_START, NavEffect};
pub use env::Environment;
pub use event::{NavEvent, Timer};
pub use link::{LinkTarget, find_href, is_in_site};
pub use page::FetchedPage;
pub use runtime::{NavHost, NavRuntime};
pub use state::{NavState, Navigator, PageContext};

use std::time::Duration;

/// Delay between the fetched page arriving and the content swap, so the
/// fade-out can finish.
pub const SWAP_DELAY: Duration = Duration::from_millis(150);

/// Delay between the swap and restoring opacity.
pub const FADE_IN_DELAY: Duration = Duration::from_millis(10);

/// Viewports at most this wide collapse the ToC when navigating.
pub const TOC_COLLAPSE_WIDTH: u32 = 1200;
