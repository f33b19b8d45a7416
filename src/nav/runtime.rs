//! Navigation runtime: owns the navigator and executes its effects.

use super::{LinkTarget, NavEffect, NavEvent, Navigator, PageContext, Timer, find_href};
use super::Environment;
use crate::config::NavConfig;

/// Browser-side capabilities the runtime drives.
pub trait NavHost {
    /// Snapshot of the current document.
    fn context(&self) -> PageContext;

    fn user_agent(&self) -> String;

    fn execute(&mut self, effect: NavEffect);
}

/// Event listener glue around a [`Navigator`].
///
/// Events arriving before [`attach`](Self::attach) are ignored, matching a
/// page where the listeners were never installed.
pub struct NavRuntime<H: NavHost> {
    host: H,
    navigator: Navigator,
    attached: bool,
}

impl<H: NavHost> NavRuntime<H> {
    pub fn new(host: H, config: &NavConfig) -> Self {
        Self {
            host,
            navigator: Navigator::new(config.container.clone()),
            attached: false,
        }
    }

    /// Install the click and popstate listeners.
    ///
    /// Returns `false` if they were already installed; setup may run more
    /// than once per page.
    pub fn attach(&mut self) -> bool {
        if self.attached {
            return false;
        }
        self.attached = true;
        let env = Environment::detect(&self.host.user_agent());
        self.navigator.set_environment(env);
        true
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn on_click(&mut self, target: &dyn LinkTarget) {
        if let Some(href) = find_href(target) {
            self.handle(NavEvent::Click { href });
        }
    }

    pub fn on_popstate(&mut self, state: Option<String>) {
        self.handle(NavEvent::PopState { state });
    }

    pub fn on_fetch(&mut self, generation: u64, result: Result<String, String>) {
        let event = match result {
            Ok(body) => NavEvent::FetchResolved { generation, body },
            Err(reason) => NavEvent::FetchFailed { generation, reason },
        };
        self.handle(event);
    }

    pub fn on_timer(&mut self, timer: Timer) {
        self.handle(NavEvent::Timer(timer));
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn handle(&mut self, event: NavEvent) {
        if !self.attached {
            return;
        }
        let ctx = self.host.context();
        for effect in self.navigator.update(&ctx, event) {
            self.host.execute(effect);
        }
    }
}
