//! # quill CLI entry point
//!
//! Parses command-line arguments, initializes logging, and dispatches to
//! subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quill_cli::config::CliConfig;
use quill_cli::export::{run_export, ExportArgs};
use quill_cli::reformat::{run_reformat, ReformatArgs};
use quill_cli::validate::{run_validate, ValidateArgs};

/// Quillnote backup toolkit.
///
/// Validates backup files against the Quillnote schema, re-emits them in
/// canonical form, and exports notes as Markdown files organized by notebook.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a backup against the schema and summarize its contents.
    Validate(ValidateArgs),

    /// Write every note as a Markdown file, one folder per notebook.
    Export(ExportArgs),

    /// Re-emit a backup as canonical pretty-printed JSON.
    Reformat(ReformatArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::from_env();
    tracing::debug!(?config, "loaded configuration");

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &config),
        Commands::Export(args) => run_export(&args, &config),
        Commands::Reformat(args) => run_reformat(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
