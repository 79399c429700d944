//! `certgen init [<dir>]` — sample roster, output directory and config file.
//!
//! Existing files are never overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use certgen_core::{config::DEFAULT_CONFIG_FILE, Config};

const SAMPLE_ROSTER_FILE: &str = "sample_names.csv";

const SAMPLE_ROSTER: &str = "\
Lastname,Name,completion_date
Doe,John,2025-01-15
Smith,Jane,2025-01-20
Johnson,Bob,2025-01-25
";

const CONFIG_HEADER: &str = "\
# certgen configuration.
# Every key is optional; omitted keys keep the defaults shown here.
# certificate.date: printed as written, defaults to today (YYYY-MM-DD).
# paths.template: a .tex file with {{KEY}} placeholders, defaults to the built-in one.
";

/// Arguments for `certgen init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to set up.
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("cannot create '{}'", self.dir.display()))?;

        let config = Config::default();

        create_file(&self.dir.join(SAMPLE_ROSTER_FILE), SAMPLE_ROSTER)?;

        let output_dir = self.dir.join(&config.paths.output_dir);
        if output_dir.is_dir() {
            println!("  {} already exists", output_dir.display());
        } else {
            fs::create_dir_all(&output_dir)
                .with_context(|| format!("cannot create '{}'", output_dir.display()))?;
            println!("{} Created {}", "✓".green(), output_dir.display());
        }

        let yaml = config.to_yaml().context("failed to render default config")?;
        create_file(
            &self.dir.join(DEFAULT_CONFIG_FILE),
            &format!("{CONFIG_HEADER}{yaml}"),
        )?;

        println!();
        println!("Next steps:");
        println!(
            "  1. Copy {SAMPLE_ROSTER_FILE} to {} and fill in your participants",
            config.paths.roster.display()
        );
        println!("  2. Edit {DEFAULT_CONFIG_FILE} with the workshop details");
        println!("  3. Run `certgen preview` to check the layout");
        println!("  4. Run `certgen generate`");
        Ok(())
    }
}

fn create_file(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        println!("  {} already exists", path.display());
        return Ok(());
    }
    fs::write(path, contents).with_context(|| format!("cannot write '{}'", path.display()))?;
    println!("{} Created {}", "✓".green(), path.display());
    Ok(())
}
