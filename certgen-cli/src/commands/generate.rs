//! `certgen generate` — fill the template for every participant and typeset.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use certgen_build::{
    pipeline::{self, RunOptions, RunReport, Source},
    CombinedOutcome, CommandTypesetter, Failure, PersonOutcome,
};
use certgen_core::Config;

use super::{load_config, print_failure};

/// Arguments for `certgen generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Config file (defaults to ./certgen.yaml when present).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Participant roster CSV (overrides the config).
    #[arg(long, short = 'r')]
    pub roster: Option<PathBuf>,

    /// Template file (overrides the config; default is the built-in template).
    #[arg(long, short = 't')]
    pub template: Option<PathBuf>,

    /// Participant name; repeat for several. Skips the roster.
    #[arg(long = "name", short = 'n', value_name = "NAME")]
    pub names: Vec<String>,

    /// Directory for generated `.tex` documents.
    #[arg(long)]
    pub tex_dir: Option<PathBuf>,

    /// Directory for finished artifacts.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Only build the combined document.
    #[arg(long)]
    pub no_individual: bool,

    /// Write documents without running the typesetter.
    #[arg(long)]
    pub no_compile: bool,

    /// Print the run report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    pub fn run(self) -> Result<()> {
        let mut config = load_config(self.config.as_deref())?;
        self.apply_overrides(&mut config);

        let source = Source::resolve(self.names.clone(), &config.paths.roster);
        tracing::debug!("source: {source:?}, tex dir {}", config.paths.tex_dir.display());
        if !self.json {
            print_source(&source, &config);
        }

        let typesetter = CommandTypesetter::new(&config.engine);
        let options = RunOptions {
            individual: !self.no_individual,
            compile: !self.no_compile,
        };
        let report =
            pipeline::run(&config, &typesetter, source, options).context("generate failed")?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to serialize report")?
            );
        } else {
            print_report(&report);
        }
        Ok(())
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(roster) = &self.roster {
            config.paths.roster = roster.clone();
        }
        if let Some(template) = &self.template {
            config.paths.template = Some(template.clone());
        }
        if let Some(dir) = &self.tex_dir {
            config.paths.tex_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.paths.output_dir = dir.clone();
        }
    }
}

fn print_source(source: &Source, config: &Config) {
    match source {
        Source::Names { names } => println!("Using {} name(s) from the command line", names.len()),
        Source::Roster { path } => println!("Reading participants from {}", path.display()),
        Source::Example => {
            println!(
                "{} CSV file '{}' not found. Using example names instead.",
                "!".yellow(),
                config.paths.roster.display()
            );
            println!("  Example documents are written but not compiled.");
        }
    }
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "detail")]
    detail: String,
}

impl From<&PersonOutcome> for OutcomeRow {
    fn from(outcome: &PersonOutcome) -> Self {
        match outcome {
            PersonOutcome::Generated { name, artifact } => OutcomeRow {
                name: name.clone(),
                status: "generated".green().to_string(),
                detail: artifact.display().to_string(),
            },
            PersonOutcome::Failed { name, failure, .. } => OutcomeRow {
                name: name.clone(),
                status: "failed".red().to_string(),
                detail: failure_detail(failure),
            },
        }
    }
}

/// The failure message, followed by the tool's diagnostics when there are any.
fn failure_detail(failure: &Failure) -> String {
    match failure {
        Failure::ExitStatus { diagnostics, .. } if !diagnostics.is_empty() => {
            format!("{failure}\n{diagnostics}")
        }
        _ => failure.to_string(),
    }
}

fn print_report(report: &RunReport) {
    if let Some(batch) = &report.individual {
        if !batch.outcomes.is_empty() {
            let rows: Vec<OutcomeRow> = batch.outcomes.iter().map(OutcomeRow::from).collect();
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{table}");
        }
        println!(
            "Individual certificates: {}/{} generated",
            batch.generated_count(),
            batch.outcomes.len()
        );
    }

    let combined = &report.combined;
    println!(
        "Generated LaTeX file: {} ({} certificate(s))",
        combined.build.document.display(),
        combined.build.included.len()
    );
    for name in &combined.build.skipped {
        println!(
            "{} skipped '{name}': template has no document body",
            "!".yellow()
        );
    }

    match &combined.compile {
        Some(CombinedOutcome::Compiled { artifact }) => {
            println!("{} Combined certificates: {}", "✓".green(), artifact.display())
        }
        Some(CombinedOutcome::Failed { failure }) => print_failure("combined document", failure),
        None => println!("Compilation skipped."),
    }

    let artifacts = report.artifacts();
    println!("{} artifact(s) produced", artifacts.len());
}
