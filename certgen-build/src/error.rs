//! Error types for certgen-build.

use std::path::PathBuf;

use thiserror::Error;

use certgen_core::CoreError;
use certgen_renderer::RenderError;

/// Errors that abort a whole run.
///
/// Per-person and combined-compile problems are not errors; they are reported
/// as [`crate::Failure`] values inside the run's results.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Roster or configuration problem.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Template could not be loaded.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from invoking the external typesetter.
#[derive(Debug, Error)]
pub enum TypesetError {
    /// The program is not on `PATH`.
    #[error(
        "{program} not found; install a LaTeX distribution \
         (TeX Live on Linux, MacTeX on macOS, MiKTeX on Windows)"
    )]
    ToolNotFound { program: String },

    /// The program exists but could not be started or waited on.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`BuildError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BuildError {
    BuildError::Io {
        path: path.into(),
        source,
    }
}
