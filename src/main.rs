//! Folio command-line entry point.

use anyhow::{Context, Result, bail};
use clap::{ColorChoice, Parser};
use folio::build::Build;
use folio::cli::{Cli, Commands};
use folio::config::SiteConfig;
use folio::content::MarkdownBuilder;
use folio::log;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build(&config),
    }
}

/// Build the site on a single-threaded runtime.
fn build(config: &SiteConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let builder = MarkdownBuilder::default();
    let report = runtime.block_on(Build::new(config, &builder).run())?;

    if !report.is_success() {
        for failure in &report.failures {
            log!("failed"; "{}", failure.path.display());
        }
        bail!(
            "{} of {} file(s) failed to build",
            report.failures.len(),
            report.settled()
        );
    }

    log!("build"; "{} page(s) written", report.pages.len());
    Ok(())
}
