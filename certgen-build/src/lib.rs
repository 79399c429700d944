//! # certgen-build
//!
//! Writes certificate documents, drives the external typesetter and collects
//! the finished artifacts.
//!
//! Call [`build_individual`] for one artifact per person, [`build_from_rows`]
//! or [`build_from_list`] plus [`compile_combined`] for a single combined
//! artifact, or [`pipeline::run`] for the whole flow.

pub mod artifact;
pub mod batch;
pub mod combined;
pub mod error;
pub mod pipeline;
pub mod typesetter;
pub mod writer;

pub use artifact::Failure;
pub use batch::{build_individual, BatchReport, PersonOutcome};
pub use combined::{
    build_combined, build_from_list, build_from_rows, compile_combined, CombinedBuild,
    CombinedOutcome,
};
pub use error::{BuildError, TypesetError};
pub use pipeline::{CombinedReport, RunOptions, RunReport, Source};
pub use typesetter::{CommandTypesetter, CompileOutput, Typesetter};
