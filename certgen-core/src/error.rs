//! Error types for certgen-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from reading rosters and configuration.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Underlying I/O failure, annotated with the path involved.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The roster file could not be decoded as CSV.
    #[error("failed to read roster at {path}: {source}")]
    Roster {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// YAML parse error on config load; includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An explicitly requested config file does not exist.
    #[error("config not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// YAML serialization error (writing a default config).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience constructor for [`CoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CoreError {
    CoreError::Io {
        path: path.into(),
        source,
    }
}
