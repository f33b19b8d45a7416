//! Build orchestrator.
//!
//! Enumerates admitted source files, drives each through the page pipeline
//! with up to `build.jobs` tasks in flight, then seals and flushes the
//! stylesheet and the script bundle. The build resolves once every file
//! task has settled and both flushes have completed.
//!
//! File tasks are futures interleaved on the calling task, never spawned,
//! so the accumulators see one registration at a time.
//!
//! # Example
//!
//! ```ignore
//! let builder = MarkdownBuilder::default();
//! let report = Build::new(&config, &builder)
//!     .hook(named("footer", |file, _| { file.content.body_html.push_str(FOOTER); Ok(()) }))
//!     .run()
//!     .await?;
//! ```

mod error;
mod file;
mod pipeline;
mod report;
mod source;
mod write;

pub use error::{BuildError, FileError, display_chain};
pub use file::{PipelineFile, SourceFile};
pub use report::{BuildReport, FileFailure};
pub use source::enumerate;

use futures_util::{StreamExt, stream};
use std::path::PathBuf;

use crate::asset::{BundleSink, Flush, FlushError, ScriptBundle, StyleSheet, StyleSink};
use crate::config::SiteConfig;
use crate::content::{ContentBuilder, MarkdownOptions, Toc};
use crate::hooks::PostHook;
use crate::logger::{progress_done, progress_start};
use pipeline::Pipeline;

/// One build of the site.
pub struct Build<'a> {
    config: &'a SiteConfig,
    builder: &'a dyn ContentBuilder,
    hooks: Vec<Box<dyn PostHook>>,
}

impl<'a> Build<'a> {
    pub fn new(config: &'a SiteConfig, builder: &'a dyn ContentBuilder) -> Self {
        Self {
            config,
            builder,
            hooks: Vec::new(),
        }
    }

    /// Append a post-processing hook. Hooks run in the order added.
    pub fn hook(mut self, hook: impl PostHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Run the build with the configured stylesheet and script bundle.
    pub async fn run(&self) -> Result<BuildReport, BuildError> {
        let styles = StyleSheet::from_config(self.config);
        let bundle = ScriptBundle::from_config(self.config);
        self.run_with(&styles.sink(), &bundle.sink(), &styles, &bundle)
            .await
    }

    /// Run the build against explicit artifact sinks and flushes.
    pub async fn run_with(
        &self,
        styles: &StyleSink,
        bundle: &BundleSink,
        style_flush: &dyn Flush,
        bundle_flush: &dyn Flush,
    ) -> Result<BuildReport, BuildError> {
        let toc_path = self.config.toc_path();
        let toc = Toc::load(&toc_path, &MarkdownOptions::all())
            .await
            .map_err(|e| BuildError::Toc(toc_path, e))?;

        let sources = enumerate(&self.config.src);
        crate::debug!("build"; "{} admitted file(s)", sources.len());

        let pipeline = Pipeline {
            config: self.config,
            builder: self.builder,
            hooks: &self.hooks,
            toc: &toc,
            styles,
            bundle,
        };

        let mut report = BuildReport::default();
        let mut settled = stream::iter(sources)
            .map(|source| run_file(&pipeline, source))
            .buffer_unordered(self.config.build.jobs.max(1));

        while let Some((source, result)) = settled.next().await {
            match result {
                Ok(page) => report.pages.push(page),
                Err(error) => report.failures.push(FileFailure {
                    path: source,
                    error,
                }),
            }
        }
        drop(settled);

        // Both flushes settle before either error is reported
        let (style_result, bundle_result) =
            tokio::join!(flush_artifact(style_flush), flush_artifact(bundle_flush));
        style_result?;
        bundle_result?;

        report.artifacts = vec![
            style_flush.path().to_path_buf(),
            bundle_flush.path().to_path_buf(),
        ];
        report.sort();
        Ok(report)
    }
}

/// Convenience wrapper around [`Build`].
pub async fn build_site(
    config: &SiteConfig,
    builder: &dyn ContentBuilder,
    hooks: Vec<Box<dyn PostHook>>,
) -> Result<BuildReport, BuildError> {
    Build {
        config,
        builder,
        hooks,
    }
    .run()
    .await
}

async fn run_file(
    pipeline: &Pipeline<'_>,
    source: SourceFile,
) -> (PathBuf, Result<PathBuf, FileError>) {
    let source_path = source.full_path();
    progress_start(&source_path);

    let result = pipeline.process(source).await;
    match &result {
        Ok(page) => progress_done(page),
        Err(e) => crate::log!("error"; "{}", display_chain(e)),
    }
    (source_path, result)
}

async fn flush_artifact(artifact: &dyn Flush) -> Result<(), FlushError> {
    progress_start(artifact.path());
    artifact.flush().await?;
    progress_done(artifact.path());
    Ok(())
}

#[cfg(test)]
mod tests;
