//! certgen core library — domain types, roster parsing, configuration, errors.
//!
//! Public API surface:
//! - [`types`] — people, field sets, certificate identifiers
//! - [`roster`] — tabular participant input
//! - [`config`] — YAML configuration and per-run defaults
//! - [`error`] — [`CoreError`]

pub mod config;
pub mod error;
pub mod roster;
pub mod types;

pub use config::{CertificateOptions, Columns, Config, EngineConfig, Paths};
pub use error::CoreError;
pub use types::{safe_file_stem, CertificateId, FieldKey, FieldSet, Person, EXAMPLE_NAMES};
