//! Individual certificates: one document and one artifact per person.
//!
//! People are processed strictly one after another. A failure for one person
//! is recorded in the [`BatchReport`] and the batch moves on.

use std::path::{Path, PathBuf};

use serde::Serialize;

use certgen_renderer::{Certificate, DocumentEngine};

use crate::artifact::{compile_and_collect, Failure};
use crate::error::BuildError;
use crate::typesetter::Typesetter;
use crate::writer::{ensure_dir, write_document};

/// Outcome for one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PersonOutcome {
    /// The artifact is at `artifact`.
    Generated { name: String, artifact: PathBuf },
    /// No artifact; `document` is kept for inspection when it was written.
    Failed {
        name: String,
        document: Option<PathBuf>,
        failure: Failure,
    },
}

impl PersonOutcome {
    pub fn name(&self) -> &str {
        match self {
            PersonOutcome::Generated { name, .. } | PersonOutcome::Failed { name, .. } => name,
        }
    }
}

/// Ordered per-person outcomes of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<PersonOutcome>,
}

impl BatchReport {
    /// Artifacts produced, in input order.
    pub fn artifacts(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                PersonOutcome::Generated { artifact, .. } => Some(artifact.as_path()),
                PersonOutcome::Failed { .. } => None,
            })
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &Failure)> {
        self.outcomes.iter().filter_map(|o| match o {
            PersonOutcome::Failed { name, failure, .. } => Some((name.as_str(), failure)),
            PersonOutcome::Generated { .. } => None,
        })
    }

    pub fn generated_count(&self) -> usize {
        self.artifacts().len()
    }
}

/// Write, typeset and collect one standalone certificate per person.
///
/// Documents go to `tex_dir` as `certificate_<safe name>.tex`; artifacts are
/// moved to `output_dir`. Only failing to create the two directories aborts
/// the batch.
pub fn build_individual(
    engine: &DocumentEngine,
    certs: &[Certificate],
    typesetter: &dyn Typesetter,
    tex_dir: &Path,
    output_dir: &Path,
) -> Result<BatchReport, BuildError> {
    ensure_dir(tex_dir)?;
    ensure_dir(output_dir)?;

    let mut report = BatchReport::default();
    for cert in certs {
        let outcome = build_one(engine, cert, typesetter, tex_dir, output_dir);
        match &outcome {
            PersonOutcome::Generated { artifact, .. } => {
                tracing::info!("generated {} for '{}'", artifact.display(), cert.name)
            }
            PersonOutcome::Failed { failure, .. } => {
                tracing::warn!("failed for '{}': {failure}", cert.name)
            }
        }
        report.outcomes.push(outcome);
    }
    Ok(report)
}

fn build_one(
    engine: &DocumentEngine,
    cert: &Certificate,
    typesetter: &dyn Typesetter,
    tex_dir: &Path,
    output_dir: &Path,
) -> PersonOutcome {
    let doc = engine.render_individual(cert);
    let document = tex_dir.join(format!("{}.tex", doc.file_stem));

    if let Err(e) = write_document(&document, &doc.content) {
        return PersonOutcome::Failed {
            name: cert.name.clone(),
            document: None,
            failure: Failure::Invocation {
                message: e.to_string(),
            },
        };
    }

    let extension = typesetter.artifact_extension();
    let destination = output_dir.join(format!("{}.{extension}", doc.file_stem));
    match compile_and_collect(typesetter, &document, tex_dir, &destination) {
        Ok(artifact) => PersonOutcome::Generated {
            name: cert.name.clone(),
            artifact,
        },
        Err(failure) => PersonOutcome::Failed {
            name: cert.name.clone(),
            document: Some(document),
            failure,
        },
    }
}
