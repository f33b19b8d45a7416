//! Source enumeration.

use jwalk::WalkDir;
use std::path::{Path, PathBuf};

use super::SourceFile;
use crate::config::SourceConfig;

/// Enumerate admitted source files under `src.base`, sorted by path.
///
/// `pick` and `drop` are matched against the `/`-separated path relative
/// to the base; `drop` wins over `pick`.
pub fn enumerate(src: &SourceConfig) -> Vec<SourceFile> {
    let base = &src.base;
    let mut files: Vec<SourceFile> = WalkDir::new(base)
        .sort(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                crate::log!("warning"; "skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| relative(base, &e.path()))
        .filter(|rel| src.admits(&slash_path(rel)))
        .map(|rel| SourceFile::new(base.clone(), rel, ()))
        .collect();

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

fn relative(base: &Path, path: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(Path::to_path_buf)
}

/// Relative path with `/` separators on every platform.
fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
