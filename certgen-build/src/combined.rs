//! Combined certificates. Every person goes in one document, typeset once.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use certgen_core::{CertificateOptions, Person};
use certgen_renderer::{context, Certificate, DocumentEngine};

use crate::artifact::{compile_and_collect, Failure};
use crate::error::BuildError;
use crate::typesetter::Typesetter;
use crate::writer::{ensure_dir, write_document};

/// A written combined document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedBuild {
    pub document: PathBuf,
    pub included: Vec<String>,
    /// People left out because their filled template had no body markers.
    pub skipped: Vec<String>,
}

/// Outcome of typesetting the combined document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CombinedOutcome {
    Compiled { artifact: PathBuf },
    Failed { failure: Failure },
}

/// Render `certs` into one document and write it to `output`.
pub fn build_combined(
    engine: &DocumentEngine,
    certs: &[Certificate],
    output: &Path,
) -> Result<CombinedBuild, BuildError> {
    let doc = engine.render_combined(certs);
    let document = write_document(output, &doc.content)?;
    Ok(CombinedBuild {
        document,
        included: doc.included,
        skipped: doc.skipped,
    })
}

/// Combined document for a list of display names, all sharing the caller-wide date.
pub fn build_from_list(
    engine: &DocumentEngine,
    names: &[String],
    options: &CertificateOptions,
    today: NaiveDate,
    output: &Path,
) -> Result<CombinedBuild, BuildError> {
    let certs = context::from_names(names, options, today);
    build_combined(engine, &certs, output)
}

/// Combined document for roster rows; each person keeps their completion date.
pub fn build_from_rows(
    engine: &DocumentEngine,
    people: &[Person],
    options: &CertificateOptions,
    today: NaiveDate,
    output: &Path,
) -> Result<CombinedBuild, BuildError> {
    let certs = context::from_people(people, options, today);
    build_combined(engine, &certs, output)
}

/// Typeset the combined document in its own directory and move the artifact
/// to `destination`. Failures are returned as a value, never raised.
pub fn compile_combined(
    typesetter: &dyn Typesetter,
    document: &Path,
    destination: &Path,
) -> CombinedOutcome {
    let workdir = match document.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => dir.to_path_buf(),
        None => PathBuf::from("."),
    };
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = ensure_dir(parent) {
            return CombinedOutcome::Failed {
                failure: Failure::Relocation {
                    message: e.to_string(),
                },
            };
        }
    }

    match compile_and_collect(typesetter, document, &workdir, destination) {
        Ok(artifact) => CombinedOutcome::Compiled { artifact },
        Err(failure) => {
            tracing::warn!("combined compile failed: {failure}");
            CombinedOutcome::Failed { failure }
        }
    }
}
