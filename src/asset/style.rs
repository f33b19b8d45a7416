//! Site-wide stylesheet.

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use std::path::{Path, PathBuf};

use super::{Accumulator, Flush, FlushError, minify::minify_css, write_artifact};
use crate::config::SiteConfig;

/// Write-only handle given to the content transform.
#[derive(Debug, Clone)]
pub struct StyleSink(Accumulator);

impl StyleSink {
    /// Add a named rule set. Returns `false` after the stylesheet is sealed.
    pub fn add(&self, name: &str, css: &str) -> bool {
        let accepted = self.0.register(name, css);
        if !accepted {
            crate::debug!("styles"; "sealed, dropped late rules `{}`", name);
        }
        accepted
    }
}

/// Accumulates style rules and flushes them to one stylesheet.
#[derive(Debug)]
pub struct StyleSheet {
    rules: Accumulator,
    path: PathBuf,
    minify: bool,
}

impl StyleSheet {
    pub fn new(path: PathBuf, minify: bool) -> Self {
        Self {
            rules: Accumulator::new(),
            path,
            minify,
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.stylesheet_path(), config.build.minify)
    }

    pub fn sink(&self) -> StyleSink {
        StyleSink(self.rules.clone())
    }

    /// Names of the registered rule sets.
    pub fn rule_names(&self) -> Vec<String> {
        self.rules.keys()
    }

    fn compose(&self) -> String {
        let sealed = self.rules.seal();
        let css = sealed
            .iter()
            .map(|(_, rules)| rules)
            .collect::<Vec<_>>()
            .join("\n");

        if self.minify {
            match minify_css(&css) {
                Some(min) => return min,
                None => crate::log!("styles"; "minification skipped, stylesheet does not parse"),
            }
        }
        css
    }
}

impl Flush for StyleSheet {
    fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> BoxFuture<'_, Result<(), FlushError>> {
        async move {
            let content = self.compose();
            write_artifact(&self.path, &content).await
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_flush_writes_rules_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("styles.css");
        let sheet = StyleSheet::new(out.clone(), false);
        let sink = sheet.sink();
        sink.add("layout", "body { margin: 0; }");
        sink.add("code", "pre { padding: 1rem; }");

        sheet.flush().await.unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert!(written.find("pre").unwrap() < written.find("body").unwrap());
    }

    #[tokio::test]
    async fn test_minified_flush() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("styles.css");
        let sheet = StyleSheet::new(out.clone(), true);
        sheet.sink().add("layout", "body {\n  margin: 0;\n}\n");

        sheet.flush().await.unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "body{margin:0}");
    }
}
