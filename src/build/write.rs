use std::path::PathBuf;

use super::{FileError, PipelineFile};
use crate::config::NavConfig;
use crate::content::CompiledDocument;

/// Render and persist a page at `root/path`, creating directories.
pub(crate) async fn write_page(
    file: PipelineFile<CompiledDocument>,
    nav: &NavConfig,
) -> Result<PathBuf, FileError> {
    let path = file.full_path();
    let html = file.content.render(nav);

    let written = async {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, html).await
    }
    .await;

    match written {
        Ok(()) => Ok(path),
        Err(source) => Err(FileError::Write { path, source }),
    }
}
