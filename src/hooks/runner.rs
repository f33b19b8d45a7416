//! Hook execution.

use super::PostHook;
use crate::build::{FileError, PipelineFile};
use crate::config::SiteConfig;
use crate::content::CompiledDocument;

/// Run every hook in order, stopping at the first failure.
pub fn run_post_hooks(
    hooks: &[Box<dyn PostHook>],
    file: &mut PipelineFile<CompiledDocument>,
    config: &SiteConfig,
) -> Result<(), FileError> {
    for hook in hooks {
        crate::debug!("hook"; "`{}` on {}", hook.name(), file.path.display());
        hook.process(file, config)
            .map_err(|source| FileError::Hook {
                path: file.full_path(),
                hook: hook.name().to_string(),
                source,
            })?;
    }
    Ok(())
}
