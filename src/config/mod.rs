//! Site configuration management for `folio.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! ├── types/         # ConfigError, FieldPath, Pattern
//! ├── util.rs        # Config file discovery
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section    | Purpose                                              |
//! |------------|------------------------------------------------------|
//! | `[src]`    | Source root, ToC file, pick/drop patterns            |
//! | `[dest]`   | HTML output root, artifact directory, namespace      |
//! | `[bundle]` | Artifact file names, public URL, bundle init scripts |
//! | `[title]`  | Page title composition                               |
//! | `[build]`  | Minification, file task concurrency                  |
//! | `[nav]`    | Soft navigation element ids                          |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    BuildSectionConfig, BundleConfig, DestConfig, NavConfig, SourceConfig, TitleConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath, Pattern};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Source tree settings
    #[serde(default)]
    pub src: SourceConfig,

    /// Output locations
    #[serde(default)]
    pub dest: DestConfig,

    /// Site-wide artifact settings
    #[serde(default)]
    pub bundle: BundleConfig,

    /// Title composition
    #[serde(default)]
    pub title: TitleConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildSectionConfig,

    /// Soft navigation settings
    #[serde(default)]
    pub nav: NavConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. Without one, defaults
    /// apply and the project root is the current directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let (mut config, config_path, root) = match find_config_file(&cli.config) {
            Some(path) => {
                let config = Self::from_path(&path)?;
                let root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                (config, path, root)
            }
            None => {
                crate::debug!("config"; "no {} found, using defaults", cli.config.display());
                (Self::default(), cwd.join(&cli.config), cwd)
            }
        };

        config.config_path = config_path;
        config.apply_command_options(cli);
        config.finalize(&root);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::from)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Resolve every configured path against `root`.
    ///
    /// Also the entry point for programmatic configs (tests, embedders).
    pub fn finalize(&mut self, root: &Path) {
        self.root = root.to_path_buf();
        self.src.base = resolve_path(root, &self.src.base);
        self.dest.html = resolve_path(root, &self.dest.html);
        self.dest.bundle = resolve_path(root, &self.dest.bundle);
        self.bundle.init = self
            .bundle
            .init
            .iter()
            .map(|p| resolve_path(root, p))
            .collect();
    }

    /// Table of contents source file.
    pub fn toc_path(&self) -> PathBuf {
        self.src.base.join(&self.src.toc)
    }

    /// Output path of the script bundle.
    pub fn script_path(&self) -> PathBuf {
        self.dest.bundle.join(&self.bundle.script)
    }

    /// Output path of the stylesheet.
    pub fn stylesheet_path(&self) -> PathBuf {
        self.dest.bundle.join(&self.bundle.stylesheet)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.build.jobs, args.jobs.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration, collecting all errors at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.src.validate(&mut diag);
        self.build.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

/// Expand `~` and join relative paths onto `root`, dropping `.` segments.
fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let path = PathBuf::from(expanded);
    let joined = if path.is_relative() {
        root.join(path)
    } else {
        path
    };
    joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Default config rooted at `root`, with the source tree at `root/docs/md`.
#[cfg(test)]
pub fn test_config_at(root: &Path) -> SiteConfig {
    let mut config = SiteConfig::default();
    config.build.minify = false;
    config.finalize(root);
    config
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = SiteConfig::from_str("[src\nbase = \"docs\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.dest.html, PathBuf::from("."));
        assert_eq!(config.bundle.script, "folio-bundle.js");
        assert!(config.build.minify);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[src]\nbase = \"md\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert_eq!(config.src.base, PathBuf::from("md"));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_finalize_resolves_paths() {
        let mut config = test_parse_config(
            r#"
[dest]
html = "site"
bundle = "/abs/assets"

[bundle]
init = ["scripts/init.js"]
"#,
        );
        config.finalize(Path::new("/project"));
        assert_eq!(config.src.base, PathBuf::from("/project/docs/md"));
        assert_eq!(config.dest.html, PathBuf::from("/project/site"));
        assert_eq!(config.dest.bundle, PathBuf::from("/abs/assets"));
        assert_eq!(config.bundle.init, vec![PathBuf::from("/project/scripts/init.js")]);
        assert_eq!(
            config.script_path(),
            PathBuf::from("/abs/assets/folio-bundle.js")
        );
        assert_eq!(config.toc_path(), PathBuf::from("/project/docs/md/_toc.md"));
    }

    #[test]
    fn test_finalize_current_dir_is_root() {
        let mut config = SiteConfig::default();
        config.finalize(Path::new("/project"));
        assert_eq!(config.dest.html.as_os_str(), "/project");
    }

    #[test]
    fn test_validate_missing_source_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config_at(dir.path());
        assert!(config.validate().is_err());

        fs::create_dir_all(dir.path().join("docs/md")).unwrap();
        assert!(config.validate().is_ok());
    }
}
