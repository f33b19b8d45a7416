use super::*;
use crate::asset::StyleSheet;
use crate::config::test_config_at;
use crate::content::{CompiledDocument, MarkdownBuilder};
use crate::hooks::named;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Notify;

fn write_source(config: &SiteConfig, rel: &str, content: &str) {
    let path = config.src.base.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn site(root: &Path) -> SiteConfig {
    let config = test_config_at(root);
    write_source(&config, "index.md", "# Home\n\nWelcome.\n");
    write_source(&config, "guide/intro.md", "# Intro\n\n```sh\nfolio build\n```\n");
    write_source(&config, "guide/_draft.md", "# Draft\n");
    write_source(&config, "_toc.md", "- [Home](/)\n- [Intro](/guide/intro)\n");
    write_source(&config, "notes.txt", "not markdown");
    config
}

/// Flush double that waits for the test to open its gate.
struct GatedFlush {
    path: PathBuf,
    gate: Arc<Notify>,
    flushed: AtomicBool,
}

impl Flush for GatedFlush {
    fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> BoxFuture<'_, Result<(), FlushError>> {
        async move {
            self.gate.notified().await;
            self.flushed.store(true, Ordering::SeqCst);
            Ok(())
        }
        .boxed()
    }
}

/// Flush double that always fails to write.
struct BrokenFlush(PathBuf);

impl Flush for BrokenFlush {
    fn path(&self) -> &Path {
        &self.0
    }

    fn flush(&self) -> BoxFuture<'_, Result<(), FlushError>> {
        let err = FlushError::Write(self.0.clone(), std::io::Error::other("disk full"));
        async move { Err(err) }.boxed()
    }
}

#[tokio::test]
async fn test_admitted_files_written_as_html() {
    let dir = tempfile::tempdir().unwrap();
    let config = site(dir.path());
    let builder = MarkdownBuilder::default();

    let report = Build::new(&config, &builder).run().await.unwrap();

    let root = dir.path();
    assert_eq!(
        report.pages,
        vec![root.join("guide/intro.html"), root.join("index.html")]
    );
    assert!(report.is_success());
    assert!(!root.join("guide/_draft.html").exists());
    assert!(!root.join("_toc.html").exists());
    assert!(!root.join("notes.html").exists());

    let intro = fs::read_to_string(root.join("guide/intro.html")).unwrap();
    assert!(intro.contains("<title>Intro | New Folio Project</title>"));
    assert!(intro.contains(r#"<a href="/guide/intro">Intro</a>"#));
    assert!(intro.contains(r#"<script src="/docs/assets/folio-bundle.js" defer></script>"#));

    let bundle = fs::read_to_string(config.script_path()).unwrap();
    assert!(bundle.contains("/* copy-code */"));
    assert!(bundle.contains("/* soft-nav */"));
    assert!(bundle.contains("getElementById('-folio-container')"));
    assert!(bundle.contains("'navigation-start'"));
    let styles = fs::read_to_string(config.stylesheet_path()).unwrap();
    assert!(styles.contains("pre"));
    assert_eq!(
        report.artifacts,
        vec![config.stylesheet_path(), config.script_path()]
    );
}

#[tokio::test]
async fn test_build_waits_for_flush() {
    let dir = tempfile::tempdir().unwrap();
    let config = site(dir.path());
    let builder = MarkdownBuilder::default();
    let build = Build::new(&config, &builder);

    let styles = StyleSheet::new(config.stylesheet_path(), false);
    let gate = Arc::new(Notify::new());
    let held = GatedFlush {
        path: config.script_path(),
        gate: gate.clone(),
        flushed: AtomicBool::new(false),
    };
    let bundle = ScriptBundle::new(config.script_path(), vec![], false);
    let resolved = AtomicBool::new(false);

    let run = async {
        let report = build
            .run_with(&styles.sink(), &bundle.sink(), &styles, &held)
            .await;
        resolved.store(true, Ordering::SeqCst);
        report
    };
    let control = async {
        let index = dir.path().join("index.html");
        for _ in 0..400 {
            if index.exists() && config.stylesheet_path().exists() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(index.exists());
        assert!(!resolved.load(Ordering::SeqCst));
        gate.notify_one();
    };

    let (report, ()) = tokio::join!(run, control);
    let report = report.unwrap();
    assert!(held.flushed.load(Ordering::SeqCst));
    assert!(resolved.load(Ordering::SeqCst));
    assert_eq!(report.settled(), 2);
}

#[tokio::test]
async fn test_build_waits_for_style_flush() {
    let dir = tempfile::tempdir().unwrap();
    let config = site(dir.path());
    let builder = MarkdownBuilder::default();
    let build = Build::new(&config, &builder);

    let styles = StyleSheet::new(config.stylesheet_path(), false);
    let gate = Arc::new(Notify::new());
    let held = GatedFlush {
        path: config.stylesheet_path(),
        gate: gate.clone(),
        flushed: AtomicBool::new(false),
    };
    let bundle = ScriptBundle::new(config.script_path(), vec![], false);
    let resolved = AtomicBool::new(false);

    let run = async {
        let report = build
            .run_with(&styles.sink(), &bundle.sink(), &held, &bundle)
            .await;
        resolved.store(true, Ordering::SeqCst);
        report
    };
    let control = async {
        let index = dir.path().join("index.html");
        for _ in 0..400 {
            if index.exists() && config.script_path().exists() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(config.script_path().exists());
        assert!(!resolved.load(Ordering::SeqCst));
        gate.notify_one();
    };

    let (report, ()) = tokio::join!(run, control);
    let report = report.unwrap();
    assert!(held.flushed.load(Ordering::SeqCst));
    assert!(resolved.load(Ordering::SeqCst));
    assert_eq!(report.settled(), 2);
}

#[tokio::test]
async fn test_hook_failure_isolated_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = site(dir.path());
    let builder = MarkdownBuilder::default();

    let report = Build::new(&config, &builder)
        .hook(named(
            "reject-index",
            |file: &mut PipelineFile<CompiledDocument>, _: &SiteConfig| {
                if file.path == Path::new("index.md") {
                    anyhow::bail!("index is not allowed");
                }
                Ok(())
            },
        ))
        .run()
        .await
        .unwrap();

    assert_eq!(report.pages, vec![dir.path().join("guide/intro.html")]);
    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.path, config.src.base.join("index.md"));
    assert!(matches!(&failure.error, FileError::Hook { hook, .. } if hook == "reject-index"));
    assert!(!dir.path().join("index.html").exists());
    assert!(config.script_path().exists());

    assert!(matches!(
        report.into_result(),
        Err(BuildError::Files { failed }) if failed.len() == 1
    ));
}

#[tokio::test]
async fn test_transform_failure_isolated_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = site(dir.path());
    write_source(&config, "broken.md", "> :MetaOverride missing-key\n> x\n");
    let builder = MarkdownBuilder::default();

    let report = Build::new(&config, &builder).run().await.unwrap();

    assert_eq!(report.pages.len(), 2);
    assert!(matches!(
        report.failures[0].error,
        FileError::Transform { .. }
    ));
    assert!(!dir.path().join("broken.html").exists());
}

#[tokio::test]
async fn test_flush_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = site(dir.path());
    let builder = MarkdownBuilder::default();

    let styles = StyleSheet::new(config.stylesheet_path(), false);
    let bundle = ScriptBundle::new(config.script_path(), vec![], false);
    let broken = BrokenFlush(config.script_path());

    let result = Build::new(&config, &builder)
        .run_with(&styles.sink(), &bundle.sink(), &styles, &broken)
        .await;

    assert!(matches!(result, Err(BuildError::Flush(FlushError::Write(..)))));
    // the other flush and every file task still settled
    assert!(config.stylesheet_path().exists());
    assert!(dir.path().join("index.html").exists());
}

#[tokio::test]
async fn test_unreadable_toc_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = site(dir.path());
    fs::remove_file(config.toc_path()).unwrap();
    fs::create_dir_all(config.toc_path()).unwrap();
    let builder = MarkdownBuilder::default();

    let result = Build::new(&config, &builder).run().await;
    assert!(matches!(result, Err(BuildError::Toc(..))));
    assert!(!dir.path().join("index.html").exists());
}

#[tokio::test]
async fn test_namespace_applied_to_pages() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = site(dir.path());
    config.dest.namespace = "handbook".into();
    let builder = MarkdownBuilder::default();

    build_site(&config, &builder, Vec::new()).await.unwrap();

    let intro = fs::read_to_string(dir.path().join("guide/intro.html")).unwrap();
    assert!(intro.contains(r#"<a href="/handbook/guide/intro">Intro</a>"#));
    assert!(intro.contains(r#"href="/handbook/docs/assets/folio-styles.css""#));
}

#[tokio::test]
async fn test_rebuild_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let config = site(dir.path());
    let builder = MarkdownBuilder::default();

    let snapshot = |report: &BuildReport| -> Vec<(PathBuf, Vec<u8>)> {
        report
            .pages
            .iter()
            .chain(&report.artifacts)
            .map(|p| (p.clone(), fs::read(p).unwrap()))
            .collect()
    };

    let first = Build::new(&config, &builder).run().await.unwrap();
    let first = snapshot(&first);
    let second = Build::new(&config, &builder).run().await.unwrap();
    let second = snapshot(&second);

    assert_eq!(first, second);
}
