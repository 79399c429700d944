//! `certgen doctor` — check that the configured typesetter runs.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;

use certgen_build::CommandTypesetter;

use super::load_config;

/// Arguments for `certgen doctor`.
#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Config file (defaults to ./certgen.yaml when present).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}

impl DoctorArgs {
    pub fn run(self) -> Result<()> {
        let config = load_config(self.config.as_deref())?;
        let typesetter = CommandTypesetter::new(&config.engine);

        match typesetter.version() {
            Ok(version) => {
                println!("{} {}: {version}", "✓".green(), typesetter.program());
                let template = config
                    .paths
                    .template
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "built-in".to_string());
                println!("  template: {template}");
                println!("  roster:   {}", config.paths.roster.display());
                Ok(())
            }
            Err(e) => {
                println!("{} {e}", "✗".red());
                bail!("typesetter '{}' is not usable", typesetter.program())
            }
        }
    }
}
