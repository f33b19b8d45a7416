//! Site-wide script bundle.

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use std::path::{Path, PathBuf};

use super::{Accumulator, Flush, FlushError, minify::minify_js, write_artifact};
use crate::config::SiteConfig;

/// Write-only handle given to file tasks.
#[derive(Debug, Clone)]
pub struct BundleSink(Accumulator);

impl BundleSink {
    /// Register a named script. Returns `false` after the bundle is sealed.
    pub fn register(&self, name: &str, source: &str) -> bool {
        let accepted = self.0.register(name, source);
        if !accepted {
            crate::debug!("bundle"; "sealed, dropped late script `{}`", name);
        }
        accepted
    }
}

/// Accumulates script registrations and flushes them to one file.
#[derive(Debug)]
pub struct ScriptBundle {
    entries: Accumulator,
    path: PathBuf,
    init: Vec<PathBuf>,
    minify: bool,
}

impl ScriptBundle {
    pub fn new(path: PathBuf, init: Vec<PathBuf>, minify: bool) -> Self {
        Self {
            entries: Accumulator::new(),
            path,
            init,
            minify,
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            config.script_path(),
            config.bundle.init.clone(),
            config.build.minify,
        )
    }

    pub fn sink(&self) -> BundleSink {
        BundleSink(self.entries.clone())
    }

    /// Names of the registered scripts.
    pub fn script_names(&self) -> Vec<String> {
        self.entries.keys()
    }

    /// Seal and compose the bundle text: init scripts first, then
    /// registrations ordered by name.
    async fn compose(&self) -> Result<String, FlushError> {
        let sealed = self.entries.seal();

        let mut out = String::new();
        for path in &self.init {
            let source = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| FlushError::Init(path.clone(), e))?;
            out.push_str(&source);
            out.push('\n');
        }
        for (name, source) in sealed.iter() {
            out.push_str(&format!("/* {name} */\n"));
            out.push_str(source);
            out.push('\n');
        }

        if self.minify {
            match minify_js(&out) {
                Some(min) => return Ok(min),
                None => crate::log!("bundle"; "minification skipped, bundle does not parse"),
            }
        }
        Ok(out)
    }
}

impl Flush for ScriptBundle {
    fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> BoxFuture<'_, Result<(), FlushError>> {
        async move {
            let content = self.compose().await?;
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
    async fn test_flush_orders_init_then_registrations() {
        let dir = tempfile::tempdir().unwrap();
        let init = dir.path().join("init.js");
        fs::write(&init, "var boot = 1;").unwrap();
        let out = dir.path().join("assets/bundle.js");

        let bundle = ScriptBundle::new(out.clone(), vec![init], false);
        let sink = bundle.sink();
        sink.register("zeta", "var z = 1;");
        sink.register("alpha", "var a = 1;");

        bundle.flush().await.unwrap();

        let written = fs::read_to_string(&out).unwrap();
        let boot = written.find("var boot").unwrap();
        let alpha = written.find("var a").unwrap();
        let zeta = written.find("var z").unwrap();
        assert!(boot < alpha && alpha < zeta);
    }

    #[tokio::test]
    async fn test_late_registration_does_not_reach_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("bundle.js");
        let bundle = ScriptBundle::new(out.clone(), vec![], false);
        let sink = bundle.sink();
        sink.register("early", "var early = 1;");

        bundle.flush().await.unwrap();
        assert!(!sink.register("late", "var late = 1;"));

        let written = fs::read_to_string(&out).unwrap();
        assert!(written.contains("early"));
        assert!(!written.contains("late"));
    }

    #[tokio::test]
    async fn test_missing_init_script_is_flush_error() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = ScriptBundle::new(
            dir.path().join("bundle.js"),
            vec![dir.path().join("missing.js")],
            false,
        );
        let err = bundle.flush().await.unwrap_err();
        assert!(matches!(err, FlushError::Init(..)));
    }
}
