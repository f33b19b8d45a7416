//! Per-file stage chain.
//!
//! read -> content -> bundle collect -> namespace -> meta override ->
//! post hooks -> `.html` -> output root -> write

use std::path::PathBuf;

use super::{FileError, PipelineFile, SourceFile};
use crate::asset::{BundleSink, StyleSink};
use crate::config::{BundleConfig, SiteConfig};
use crate::content::{
    CompiledDocument, ContentBuilder, Toc, TransformContext, meta::apply_overrides,
    namespace::apply_namespace,
};
use crate::hooks::{PostHook, run_post_hooks};

/// Shared, read-only state for every file task of one build.
pub(crate) struct Pipeline<'a> {
    pub config: &'a SiteConfig,
    pub builder: &'a dyn ContentBuilder,
    pub hooks: &'a [Box<dyn PostHook>],
    pub toc: &'a Toc,
    pub styles: &'a StyleSink,
    pub bundle: &'a BundleSink,
}

impl Pipeline<'_> {
    /// Drive one file through every stage. Returns the written path.
    pub async fn process(&self, source: SourceFile) -> Result<PathBuf, FileError> {
        let file = read(source).await?;
        let mut file = self.transform(file).await?;

        collect_bundle(&mut file.content, self.bundle, &self.config.bundle);
        if let Some(prefix) = self.config.dest.namespace_prefix() {
            apply_namespace(&mut file.content, &prefix);
        }
        apply_overrides(&mut file.content);
        run_post_hooks(self.hooks, &mut file, self.config)?;

        let file = file.map_ext("html").map_root(&self.config.dest.html);
        super::write::write_page(file, &self.config.nav).await
    }

    async fn transform(
        &self,
        file: PipelineFile<String>,
    ) -> Result<PipelineFile<CompiledDocument>, FileError> {
        let ctx = TransformContext {
            path: &file.path,
            toc: self.toc,
            config: self.config,
            styles: self.styles,
        };
        let doc = self
            .builder
            .build(&file.content, ctx)
            .await
            .map_err(|source| FileError::Transform {
                path: file.full_path(),
                source,
            })?;
        Ok(file.with_content(doc))
    }
}

async fn read(source: SourceFile) -> Result<PipelineFile<String>, FileError> {
    let path = source.full_path();
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| FileError::Read { path, source })?;
    Ok(source.with_content(content))
}

/// Move page script registrations into the bundle and link the page to
/// both site-wide artifacts.
fn collect_bundle(doc: &mut CompiledDocument, sink: &BundleSink, bundle: &BundleConfig) {
    for script in doc.scripts.drain(..) {
        sink.register(&script.name, &script.source);
    }
    doc.stylesheets.push(bundle.url_for(&bundle.stylesheet));
    doc.head_scripts.push(bundle.url_for(&bundle.script));
}
