//! Caller-supplied post-processing hooks.
//!
//! Hooks run after the fixed pipeline stages and before the page is
//! written, in the order they were added to the build. A failing hook
//! aborts its own file only.

mod runner;

pub use runner::run_post_hooks;

use crate::build::PipelineFile;
use crate::config::SiteConfig;
use crate::content::CompiledDocument;

/// A post-processor applied to every compiled page.
pub trait PostHook: Send + Sync {
    /// Name shown when the hook fails.
    fn name(&self) -> &str {
        "anonymous"
    }

    fn process(
        &self,
        file: &mut PipelineFile<CompiledDocument>,
        config: &SiteConfig,
    ) -> anyhow::Result<()>;
}

impl<F> PostHook for F
where
    F: Fn(&mut PipelineFile<CompiledDocument>, &SiteConfig) -> anyhow::Result<()> + Send + Sync,
{
    fn process(
        &self,
        file: &mut PipelineFile<CompiledDocument>,
        config: &SiteConfig,
    ) -> anyhow::Result<()> {
        self(file, config)
    }
}

/// Attach a name to a closure hook.
pub fn named<F>(name: impl Into<String>, hook: F) -> Named<F>
where
    F: Fn(&mut PipelineFile<CompiledDocument>, &SiteConfig) -> anyhow::Result<()> + Send + Sync,
{
    Named {
        name: name.into(),
        hook,
    }
}

/// A closure hook with a display name.
pub struct Named<F> {
    name: String,
    hook: F,
}

impl<F> PostHook for Named<F>
where
    F: Fn(&mut PipelineFile<CompiledDocument>, &SiteConfig) -> anyhow::Result<()> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn process(
        &self,
        file: &mut PipelineFile<CompiledDocument>,
        config: &SiteConfig,
    ) -> anyhow::Result<()> {
        (self.hook)(file, config)
    }
}
