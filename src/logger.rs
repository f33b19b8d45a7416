//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro, only printed in verbose mode
//! - `progress_start` / `progress_done` for the per-file build lines
//!
//! # Example
//!
//! ```ignore
//! log!("build"; "compiling {} files", count);
//!
//! progress_start(Path::new("docs/md/intro.md"));
//! progress_done(Path::new("./intro.html"));
//! ```

use owo_colors::OwoColorize;
use std::{
    io::{Write, stdout},
    path::Path,
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "build" => prefix.bright_blue().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Progress Lines
// ============================================================================

const START_MARK: &str = "# building ........ ";
const DONE_MARK: &str = " built:: ......... ";

fn start_line(path: &Path) -> String {
    format!("{START_MARK}{}", path.display())
}

fn done_line(path: &Path) -> (String, String) {
    ("#".to_string(), format!("{DONE_MARK}{}", path.display()))
}

/// Emit the line printed before a file or artifact is processed.
pub fn progress_start(path: &Path) {
    let line = start_line(path);
    let mut stdout = stdout().lock();
    writeln!(stdout, "{}", line.dimmed()).ok();
    stdout.flush().ok();
}

/// Emit the line printed once a file or artifact has been written.
pub fn progress_done(path: &Path) {
    let (mark, rest) = done_line(path);
    let mut stdout = stdout().lock();
    writeln!(stdout, "{}{}", mark.green(), rest.dimmed()).ok();
    stdout.flush().ok();
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_line_format() {
        let line = start_line(Path::new("docs/md/guide/intro.md"));
        assert_eq!(line, "# building ........ docs/md/guide/intro.md");
    }

    #[test]
    fn test_done_line_format() {
        let (mark, rest) = done_line(Path::new("./guide/intro.html"));
        assert_eq!(format!("{mark}{rest}"), "# built:: ......... ./guide/intro.html");
    }

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
