//! End-to-end run used by `certgen generate` and `certgen preview`.
//!
//! | Source   | Individual artifacts | Combined document | Combined compile |
//! |----------|----------------------|-------------------|------------------|
//! | Roster   | yes                  | from rows         | yes              |
//! | Names    | no                   | from list         | yes              |
//! | Example  | no                   | from list         | no               |
//!
//! `RunOptions` can switch individual generation and compilation off.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::Serialize;

use certgen_core::{roster, Config, EXAMPLE_NAMES};
use certgen_renderer::{context, DocumentEngine, Template};

use crate::batch::{build_individual, BatchReport};
use crate::combined::{
    build_combined, build_from_list, compile_combined, CombinedBuild, CombinedOutcome,
};
use crate::error::BuildError;
use crate::typesetter::Typesetter;

/// Where the participant names come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Source {
    /// An explicit list of display names.
    Names { names: Vec<String> },
    /// A CSV roster file.
    Roster { path: PathBuf },
    /// The built-in example names (roster missing, nothing given).
    Example,
}

impl Source {
    /// Explicit names win; otherwise the roster if it exists; otherwise the example list.
    pub fn resolve(names: Vec<String>, roster: &Path) -> Self {
        if !names.is_empty() {
            Source::Names { names }
        } else if roster.exists() {
            Source::Roster {
                path: roster.to_path_buf(),
            }
        } else {
            tracing::info!("roster {} not found; using example names", roster.display());
            Source::Example
        }
    }
}

/// Switches for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Produce one artifact per roster row.
    pub individual: bool,
    /// Invoke the typesetter at all.
    pub compile: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            individual: true,
            compile: true,
        }
    }
}

/// The combined part of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedReport {
    #[serde(flatten)]
    pub build: CombinedBuild,
    /// `None` when compilation was not attempted.
    pub compile: Option<CombinedOutcome>,
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub source: Source,
    /// `None` when individual generation was not attempted.
    pub individual: Option<BatchReport>,
    pub combined: CombinedReport,
}

impl RunReport {
    /// Every artifact produced by the run, individual ones first.
    pub fn artifacts(&self) -> Vec<&Path> {
        let mut out = self
            .individual
            .as_ref()
            .map(BatchReport::artifacts)
            .unwrap_or_default();
        if let Some(CombinedOutcome::Compiled { artifact }) = &self.combined.compile {
            out.push(artifact.as_path());
        }
        out
    }
}

fn load_engine(config: &Config) -> Result<DocumentEngine, BuildError> {
    let template = Template::load(config.paths.template.as_deref())?;
    Ok(DocumentEngine::new(template))
}

/// Run with an explicit "today".
pub fn run_at(
    config: &Config,
    typesetter: &dyn Typesetter,
    source: Source,
    options: RunOptions,
    today: NaiveDate,
) -> Result<RunReport, BuildError> {
    let engine = load_engine(config)?;
    let paths = &config.paths;
    let combined_doc = paths.tex_dir.join(&paths.combined_document);
    let combined_artifact = paths.output_dir.join(&paths.combined_artifact);

    let (individual, build, compile) = match &source {
        Source::Roster { path } => {
            let people = roster::load_roster_at(path, &config.columns, today)?;
            let certs = context::from_people(&people, &config.certificate, today);
            let individual = if options.individual && options.compile {
                Some(build_individual(
                    &engine,
                    &certs,
                    typesetter,
                    &paths.tex_dir,
                    &paths.output_dir,
                )?)
            } else {
                None
            };
            let build = build_combined(&engine, &certs, &combined_doc)?;
            (individual, build, options.compile)
        }
        Source::Names { names } => {
            let build = build_from_list(&engine, names, &config.certificate, today, &combined_doc)?;
            (None, build, options.compile)
        }
        Source::Example => {
            let names: Vec<String> = EXAMPLE_NAMES.iter().map(|s| s.to_string()).collect();
            let build =
                build_from_list(&engine, &names, &config.certificate, today, &combined_doc)?;
            (None, build, false)
        }
    };

    let compile =
        compile.then(|| compile_combined(typesetter, &build.document, &combined_artifact));

    Ok(RunReport {
        source,
        individual,
        combined: CombinedReport { build, compile },
    })
}

/// `run_at` convenience wrapper using the local date.
pub fn run(
    config: &Config,
    typesetter: &dyn Typesetter,
    source: Source,
    options: RunOptions,
) -> Result<RunReport, BuildError> {
    run_at(config, typesetter, source, options, Local::now().date_naive())
}

/// A single named certificate written to `output`, optionally typeset in
/// place (the artifact stays next to the document).
pub fn preview_at(
    config: &Config,
    typesetter: Option<&dyn Typesetter>,
    name: &str,
    output: &Path,
    today: NaiveDate,
) -> Result<CombinedReport, BuildError> {
    let engine = load_engine(config)?;
    let names = vec![name.to_string()];
    let build = build_from_list(&engine, &names, &config.certificate, today, output)?;
    let compile = typesetter.map(|ts| {
        let artifact = build.document.with_extension(ts.artifact_extension());
        compile_combined(ts, &build.document, &artifact)
    });
    Ok(CombinedReport { build, compile })
}

/// `preview_at` convenience wrapper using the local date.
pub fn preview(
    config: &Config,
    typesetter: Option<&dyn Typesetter>,
    name: &str,
    output: &Path,
) -> Result<CombinedReport, BuildError> {
    preview_at(config, typesetter, name, output, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_names_win_over_roster() {
        let dir = TempDir::new().unwrap();
        let roster = dir.path().join("names.csv");
        std::fs::write(&roster, "Lastname,Name\n").unwrap();
        let source = Source::resolve(vec!["Doe, John".to_string()], &roster);
        assert!(matches!(source, Source::Names { .. }));
    }

    #[test]
    fn existing_roster_is_used() {
        let dir = TempDir::new().unwrap();
        let roster = dir.path().join("names.csv");
        std::fs::write(&roster, "Lastname,Name\n").unwrap();
        assert_eq!(
            Source::resolve(vec![], &roster),
            Source::Roster { path: roster.clone() }
        );
    }

    #[test]
    fn missing_roster_falls_back_to_example() {
        let dir = TempDir::new().unwrap();
        let source = Source::resolve(vec![], &dir.path().join("names.csv"));
        assert_eq!(source, Source::Example);
    }
}
