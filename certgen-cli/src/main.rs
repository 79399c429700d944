//! certgen — bulk workshop certificate generator.
//!
//! # Usage
//!
//! ```text
//! certgen generate [--roster names.csv] [--name <NAME>]... [--no-individual] [--no-compile] [--json]
//! certgen preview [--name <NAME>] [--output debug_certificate.tex] [--no-compile]
//! certgen doctor
//! certgen init [<dir>]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{doctor::DoctorArgs, generate::GenerateArgs, init::InitArgs, preview::PreviewArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "certgen",
    version,
    about = "Generate workshop completion certificates from a participant list",
    long_about = None,
)]
struct Cli {
    /// Log progress details to stderr (overridden by RUST_LOG).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render individual and combined certificates from a roster or name list.
    Generate(GenerateArgs),

    /// Render a single certificate for checking the layout.
    Preview(PreviewArgs),

    /// Check that the typesetter is installed.
    Doctor(DoctorArgs),

    /// Create a sample roster, output directory and config file.
    Init(InitArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Generate(args) => args.run(),
        Commands::Preview(args) => args.run(),
        Commands::Doctor(args) => args.run(),
        Commands::Init(args) => args.run(),
    }
}
