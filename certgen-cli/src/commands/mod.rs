pub mod doctor;
pub mod generate;
pub mod init;
pub mod preview;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use certgen_build::Failure;
use certgen_core::{config::DEFAULT_CONFIG_FILE, Config};

/// Load `--config` when given (it must exist), else `certgen.yaml` if present.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config> {
    tracing::debug!("loading config from {:?}", path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE)));
    match path {
        Some(path) => {
            Config::load(path).with_context(|| format!("cannot load config '{}'", path.display()))
        }
        None => Config::load_or_default(&PathBuf::from(DEFAULT_CONFIG_FILE))
            .context("cannot load certgen.yaml"),
    }
}

/// Print a failure, with the tool's diagnostic text when there is any.
pub(crate) fn print_failure(what: &str, failure: &Failure) {
    println!("{} {what}: {failure}", "✗".red());
    if let Failure::ExitStatus { diagnostics, .. } = failure {
        if !diagnostics.is_empty() {
            println!("  Error output:");
            for line in diagnostics.lines() {
                println!("    {line}");
            }
        }
    }
}
