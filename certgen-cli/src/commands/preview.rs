//! `certgen preview` — one certificate for checking the layout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use certgen_build::{pipeline, CombinedOutcome, CommandTypesetter, Typesetter};

use super::{load_config, print_failure};

/// Arguments for `certgen preview`.
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Config file (defaults to ./certgen.yaml when present).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Name printed on the preview certificate.
    #[arg(long, short = 'n', default_value = "Debug Testuser")]
    pub name: String,

    /// Where to write the document; the artifact lands next to it.
    #[arg(long, short = 'o', default_value = "debug_certificate.tex")]
    pub output: PathBuf,

    /// Template file (overrides the config).
    #[arg(long, short = 't')]
    pub template: Option<PathBuf>,

    /// Write the document without running the typesetter.
    #[arg(long)]
    pub no_compile: bool,
}

impl PreviewArgs {
    pub fn run(self) -> Result<()> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(template) = &self.template {
            config.paths.template = Some(template.clone());
        }

        let command = CommandTypesetter::new(&config.engine);
        let typesetter: Option<&dyn Typesetter> = if self.no_compile {
            None
        } else {
            Some(&command)
        };

        let report = pipeline::preview(&config, typesetter, &self.name, &self.output)
            .with_context(|| format!("preview failed for '{}'", self.name))?;

        println!("Generated debug LaTeX file: {}", report.build.document.display());
        match &report.compile {
            Some(CombinedOutcome::Compiled { artifact }) => {
                println!("{} Debug certificate: {}", "✓".green(), artifact.display())
            }
            Some(CombinedOutcome::Failed { failure }) => print_failure("preview", failure),
            None => println!("Compilation skipped."),
        }
        Ok(())
    }
}
