/// Host capabilities detected once when listeners are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Environment {
    /// Back/forward does a full reload instead of a soft swap.
    pub reload_on_popstate: bool,
}

impl Environment {
    pub fn detect(user_agent: &str) -> Self {
        Self {
            reload_on_popstate: is_safari(user_agent),
        }
    }
}

/// Safari user agents mention `safari` before any `chrome` or `android`;
/// Chromium-based and Android browsers carry those tokens earlier.
fn is_safari(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    let Some(safari) = ua.find("safari") else {
        return false;
    };
    let before = |token: &str| ua.find(token).is_some_and(|at| at < safari);
    !before("chrome") && !before("android")
}
