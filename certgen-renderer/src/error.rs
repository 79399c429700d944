//! Error types for certgen-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template handling.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template file could not be read or is not valid UTF-8.
    #[error("failed to load template at {path}: {source}")]
    TemplateLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
