//! Default markdown content builder.

mod options;
mod render;

pub use options::MarkdownOptions;
pub use render::{Rendered, render};

use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use super::components::{
    CODE_CSS, CODE_STYLE, COPY_CODE_JS, COPY_CODE_SCRIPT, LAYOUT_STYLE, SOFT_NAV_SCRIPT,
    layout_css, soft_nav_js,
};
use super::meta::extract_overrides;
use super::{CompiledDocument, ContentBuilder, Meta, Script, TransformContext, TransformError};

/// Compiles markdown pages with every extension enabled by default.
#[derive(Debug, Clone)]
pub struct MarkdownBuilder {
    options: MarkdownOptions,
}

impl Default for MarkdownBuilder {
    fn default() -> Self {
        Self::new(MarkdownOptions::all())
    }
}

impl MarkdownBuilder {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    fn compile(
        &self,
        content: &str,
        ctx: TransformContext<'_>,
    ) -> Result<CompiledDocument, TransformError> {
        let (markdown, overrides) = extract_overrides(content)?;
        let rendered = render(&markdown, &self.options);

        ctx.styles.add(LAYOUT_STYLE, &layout_css(&ctx.config.nav));

        let mut scripts = vec![Script::new(SOFT_NAV_SCRIPT, soft_nav_js(&ctx.config.nav))];
        if rendered.has_code {
            ctx.styles.add(CODE_STYLE, CODE_CSS);
            scripts.push(Script::new(COPY_CODE_SCRIPT, COPY_CODE_JS));
        }

        Ok(CompiledDocument {
            title: ctx.config.title.compose(rendered.heading.as_deref()),
            metas: vec![Meta::new(
                "name",
                "viewport",
                "width=device-width, initial-scale=1",
            )],
            overrides,
            toc_html: ctx.toc.html().to_string(),
            body_html: rendered.html,
            scripts,
            ..Default::default()
        })
    }
}

impl ContentBuilder for MarkdownBuilder {
    fn build<'a>(
        &'a self,
        content: &'a str,
        ctx: TransformContext<'a>,
    ) -> BoxFuture<'a, Result<CompiledDocument, TransformError>> {
        async move { self.compile(content, ctx) }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::StyleSheet;
    use crate::config::SiteConfig;
    use crate::content::Toc;
    use std::path::{Path, PathBuf};

    #[tokio::test]
    async fn test_build_page_with_code() {
        let config = SiteConfig::default();
        let sheet = StyleSheet::new(PathBuf::from("unused.css"), false);
        let styles = sheet.sink();
        let toc = Toc::from_markdown("- [Intro](/intro)\n", &MarkdownOptions::all());
        let ctx = TransformContext {
            path: Path::new("intro.md"),
            toc: &toc,
            config: &config,
            styles: &styles,
        };

        let source = "# Intro\n\n> :MetaOverride name=description\n> About folio\n\n```sh\nfolio build\n```\n";
        let doc = MarkdownBuilder::default().build(source, ctx).await.unwrap();

        assert_eq!(doc.title, "Intro | New Folio Project");
        assert_eq!(doc.overrides, vec![Meta::new("name", "description", "About folio")]);
        assert!(!doc.body_html.contains("MetaOverride"));
        assert!(doc.toc_html.contains(r#"href="/intro""#));
        let names: Vec<_> = doc.scripts.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![SOFT_NAV_SCRIPT, COPY_CODE_SCRIPT]);

        assert_eq!(sheet.rule_names(), vec![CODE_STYLE.to_string(), LAYOUT_STYLE.to_string()]);
    }

    #[tokio::test]
    async fn test_build_rejects_malformed_override() {
        let config = SiteConfig::default();
        let sheet = StyleSheet::new(PathBuf::from("unused.css"), false);
        let styles = sheet.sink();
        let toc = Toc::empty();
        let ctx = TransformContext {
            path: Path::new("bad.md"),
            toc: &toc,
            config: &config,
            styles: &styles,
        };
        let result = MarkdownBuilder::default()
            .build("> :MetaOverride nothing\n> x\n", ctx)
            .await;
        assert!(matches!(result, Err(TransformError::MetaOverride { .. })));
    }
}
