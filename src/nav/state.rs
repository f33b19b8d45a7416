//! Navigation reducer.
//!
//! All state transitions happen here. The runtime calls
//! `update(ctx, event)` and executes the returned effects.

use super::effect::{NAVIGATION, NAVIGATION_START, NavEffect};
use super::{
    Environment, FADE_IN_DELAY, FetchedPage, NavEvent, SWAP_DELAY, TOC_COLLAPSE_WIDTH, Timer,
    is_in_site,
};

/// What the host reports about the current document for each event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// `location.pathname`.
    pub path: String,
    /// Whether the content container exists in the document.
    pub has_container: bool,
    pub viewport_width: u32,
}

/// Coarse state of the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Idle,
    Fetching,
    Swapping,
}

#[derive(Debug)]
enum Phase {
    Idle,
    Fetching {
        url: String,
    },
    Swapping {
        url: String,
        /// Taken by the swap timer.
        page: Option<FetchedPage>,
    },
}

/// Soft navigation state machine.
///
/// Every accepted navigation gets a new generation; fetch results and
/// timers carrying an older generation are dropped, so the most recently
/// requested page is the one that ends up displayed.
#[derive(Debug)]
pub struct Navigator {
    container_id: String,
    env: Environment,
    phase: Phase,
    generation: u64,
}

impl Navigator {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            env: Environment::default(),
            phase: Phase::Idle,
            generation: 0,
        }
    }

    pub fn set_environment(&mut self, env: Environment) {
        self.env = env;
    }

    pub fn state(&self) -> NavState {
        match self.phase {
            Phase::Idle => NavState::Idle,
            Phase::Fetching { .. } => NavState::Fetching,
            Phase::Swapping { .. } => NavState::Swapping,
        }
    }

    /// Generation of the latest accepted navigation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn update(&mut self, ctx: &PageContext, event: NavEvent) -> Vec<NavEffect> {
        match event {
            NavEvent::Click { href } => {
                if !is_in_site(&href) {
                    return vec![];
                }
                let mut effects = vec![NavEffect::PreventDefault];
                effects.extend(self.navigate(ctx, href, true));
                effects
            }
            NavEvent::PopState { state } => {
                let url = state.unwrap_or_else(|| "/".to_string());
                if self.env.reload_on_popstate {
                    return vec![NavEffect::FullLoad { url }];
                }
                self.navigate(ctx, url, false)
            }
            NavEvent::FetchResolved { generation, body } => self.fetched(generation, &body),
            NavEvent::FetchFailed { generation, reason } => {
                // stays in fetching until the next navigation
                crate::debug!("nav"; "fetch #{} failed: {}", generation, reason);
                vec![]
            }
            NavEvent::Timer(Timer::Swap { generation }) => self.swap(generation),
            NavEvent::Timer(Timer::FadeIn { generation }) => self.fade_in(generation),
        }
    }

    fn navigate(&mut self, ctx: &PageContext, url: String, push: bool) -> Vec<NavEffect> {
        if !ctx.has_container {
            return vec![NavEffect::FullLoad { url }];
        }

        let mut effects = Vec::new();
        if ctx.viewport_width <= TOC_COLLAPSE_WIDTH {
            effects.push(NavEffect::CollapseToc);
        }
        if push && ctx.path == url {
            return effects;
        }

        self.generation += 1;
        let generation = self.generation;

        effects.push(NavEffect::FadeOut);
        if push {
            effects.push(NavEffect::PushHistory { url: url.clone() });
        }
        effects.push(NavEffect::dispatch(NAVIGATION_START, &url));
        effects.push(NavEffect::Fetch {
            url: url.clone(),
            generation,
        });

        self.phase = Phase::Fetching { url };
        effects
    }

    fn fetched(&mut self, generation: u64, body: &str) -> Vec<NavEffect> {
        if generation != self.generation {
            return vec![];
        }
        let Phase::Fetching { url } = &mut self.phase else {
            return vec![];
        };

        let page = FetchedPage::parse(body, &self.container_id);
        let mut effects = Vec::new();
        if let Some(title) = &page.title {
            effects.push(NavEffect::SetTitle {
                title: title.clone(),
            });
        }
        effects.push(NavEffect::Schedule {
            delay: SWAP_DELAY,
            timer: Timer::Swap { generation },
        });

        self.phase = Phase::Swapping {
            url: std::mem::take(url),
            page: Some(page),
        };
        effects
    }

    fn swap(&mut self, generation: u64) -> Vec<NavEffect> {
        if generation != self.generation {
            return vec![];
        }
        let Phase::Swapping { page, .. } = &mut self.phase else {
            return vec![];
        };
        let Some(page) = page.take() else {
            return vec![];
        };

        let mut effects = vec![NavEffect::ReplaceContent { html: page.content }];
        effects.extend(
            page.scripts
                .into_iter()
                .map(|source| NavEffect::RunScript { source }),
        );
        effects.push(NavEffect::Schedule {
            delay: FADE_IN_DELAY,
            timer: Timer::FadeIn { generation },
        });
        effects
    }

    fn fade_in(&mut self, generation: u64) -> Vec<NavEffect> {
        if generation != self.generation {
            return vec![];
        }
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Swapping { url, page: None } => {
                vec![NavEffect::FadeIn, NavEffect::dispatch(NAVIGATION, &url)]
            }
            other => {
                self.phase = other;
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx(path: &str) -> PageContext {
        PageContext {
            path: path.into(),
            has_container: true,
            viewport_width: 1600,
        }
    }

    fn page(title: &str, body: &str) -> String {
        format!(
            "<html><head><title>{title}</title></head><body><div id=\"c\">{body}</div></body></html>"
        )
    }

    fn click(href: &str) -> NavEvent {
        NavEvent::Click { href: href.into() }
    }

    #[test]
    fn test_same_path_click_is_noop() {
        let mut nav = Navigator::new("c");
        let effects = nav.update(&ctx("/guide/intro"), click("/guide/intro"));
        assert_eq!(effects, vec![NavEffect::PreventDefault]);
        assert_eq!(nav.state(), NavState::Idle);
        assert_eq!(nav.generation(), 0);
    }

    #[test]
    fn test_external_click_ignored() {
        let mut nav = Navigator::new("c");
        assert!(nav.update(&ctx("/a"), click("https://example.com")).is_empty());
        assert!(nav.update(&ctx("/a"), click("//cdn.example.com")).is_empty());
    }

    #[test]
    fn test_click_full_cycle() {
        let mut nav = Navigator::new("c");
        let effects = nav.update(&ctx("/a"), click("/b"));
        assert_eq!(
            effects,
            vec![
                NavEffect::PreventDefault,
                NavEffect::FadeOut,
                NavEffect::PushHistory { url: "/b".into() },
                NavEffect::Dispatch {
                    name: NAVIGATION_START,
                    detail: json!({ "url": "/b" })
                },
                NavEffect::Fetch {
                    url: "/b".into(),
                    generation: 1
                },
            ]
        );
        assert_eq!(nav.state(), NavState::Fetching);

        let effects = nav.update(
            &ctx("/b"),
            NavEvent::FetchResolved {
                generation: 1,
                body: page("B", "<p>b</p><script>run()</script>"),
            },
        );
        assert_eq!(
            effects,
            vec![
                NavEffect::SetTitle { title: "B".into() },
                NavEffect::Schedule {
                    delay: SWAP_DELAY,
                    timer: Timer::Swap { generation: 1 }
                },
            ]
        );
        assert_eq!(nav.state(), NavState::Swapping);

        let effects = nav.update(&ctx("/b"), NavEvent::Timer(Timer::Swap { generation: 1 }));
        assert_eq!(effects.len(), 3);
        assert!(matches!(&effects[0], NavEffect::ReplaceContent { html } if html.contains("<p>b</p>")));
        assert_eq!(effects[1], NavEffect::RunScript { source: "run()".into() });

        // a repeated swap timer does not replay scripts
        assert!(nav
            .update(&ctx("/b"), NavEvent::Timer(Timer::Swap { generation: 1 }))
            .is_empty());

        let effects = nav.update(&ctx("/b"), NavEvent::Timer(Timer::FadeIn { generation: 1 }));
        assert_eq!(
            effects,
            vec![
                NavEffect::FadeIn,
                NavEffect::Dispatch {
                    name: NAVIGATION,
                    detail: json!({ "url": "/b" })
                },
            ]
        );
        assert_eq!(nav.state(), NavState::Idle);
    }

    #[test]
    fn test_popstate_does_not_push() {
        let mut nav = Navigator::new("c");
        let effects = nav.update(
            &ctx("/a"),
            NavEvent::PopState {
                state: Some("/a".into()),
            },
        );
        assert!(!effects.iter().any(|e| matches!(e, NavEffect::PushHistory { .. })));
        assert!(effects.contains(&NavEffect::Fetch {
            url: "/a".into(),
            generation: 1
        }));
    }

    #[test]
    fn test_popstate_without_state_goes_home() {
        let mut nav = Navigator::new("c");
        let effects = nav.update(&ctx("/a"), NavEvent::PopState { state: None });
        assert!(effects.contains(&NavEffect::Fetch {
            url: "/".into(),
            generation: 1
        }));
    }

    #[test]
    fn test_popstate_reloads_when_environment_requires() {
        let mut nav = Navigator::new("c");
        nav.set_environment(Environment {
            reload_on_popstate: true,
        });
        let effects = nav.update(
            &ctx("/b"),
            NavEvent::PopState {
                state: Some("/a".into()),
            },
        );
        assert_eq!(effects, vec![NavEffect::FullLoad { url: "/a".into() }]);
    }

    #[test]
    fn test_missing_container_full_load() {
        let mut nav = Navigator::new("c");
        let ctx = PageContext {
            has_container: false,
            ..ctx("/a")
        };
        let effects = nav.update(&ctx, click("/b"));
        assert_eq!(
            effects,
            vec![
                NavEffect::PreventDefault,
                NavEffect::FullLoad { url: "/b".into() }
            ]
        );
        assert_eq!(nav.state(), NavState::Idle);
    }

    #[test]
    fn test_narrow_viewport_collapses_toc() {
        let mut nav = Navigator::new("c");
        let narrow = PageContext {
            viewport_width: 800,
            ..ctx("/a")
        };
        let effects = nav.update(&narrow, click("/b"));
        assert_eq!(effects[1], NavEffect::CollapseToc);
    }

    #[test]
    fn test_stale_fetch_discarded() {
        let mut nav = Navigator::new("c");
        nav.update(&ctx("/a"), click("/b"));
        nav.update(&ctx("/b"), click("/c"));
        assert_eq!(nav.generation(), 2);

        let stale = nav.update(
            &ctx("/c"),
            NavEvent::FetchResolved {
                generation: 1,
                body: page("B", "b"),
            },
        );
        assert!(stale.is_empty());
        assert_eq!(nav.state(), NavState::Fetching);

        let fresh = nav.update(
            &ctx("/c"),
            NavEvent::FetchResolved {
                generation: 2,
                body: page("C", "c"),
            },
        );
        assert_eq!(fresh[0], NavEffect::SetTitle { title: "C".into() });
    }

    #[test]
    fn test_stale_timer_discarded() {
        let mut nav = Navigator::new("c");
        nav.update(&ctx("/a"), click("/b"));
        nav.update(
            &ctx("/b"),
            NavEvent::FetchResolved {
                generation: 1,
                body: page("B", "b"),
            },
        );
        nav.update(&ctx("/b"), click("/c"));

        let effects = nav.update(&ctx("/c"), NavEvent::Timer(Timer::Swap { generation: 1 }));
        assert!(effects.is_empty());
        assert_eq!(nav.state(), NavState::Fetching);
    }

    #[test]
    fn test_failed_fetch_stalls_until_next_navigation() {
        let mut nav = Navigator::new("c");
        nav.update(&ctx("/a"), click("/b"));
        let effects = nav.update(
            &ctx("/b"),
            NavEvent::FetchFailed {
                generation: 1,
                reason: "offline".into(),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(nav.state(), NavState::Fetching);

        let effects = nav.update(&ctx("/b"), click("/c"));
        assert!(effects.contains(&NavEffect::Fetch {
            url: "/c".into(),
            generation: 2
        }));
    }
}
