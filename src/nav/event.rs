/// Timers scheduled by the navigator, tagged with their navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    Swap { generation: u64 },
    FadeIn { generation: u64 },
}

/// Inputs to [`Navigator::update`](super::Navigator::update).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// A click resolved to the `href` attribute of the nearest link.
    Click { href: String },
    /// Browser back/forward. `state` is the pushed history state.
    PopState { state: Option<String> },
    FetchResolved { generation: u64, body: String },
    FetchFailed { generation: u64, reason: String },
    Timer(Timer),
}
