//! # Reformat Subcommand
//!
//! Decodes a backup and writes it back out through the encoder: keys in a
//! stable order, two-space indentation, nothing outside the schema.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::CliConfig;

/// Arguments for the `quill reformat` subcommand.
#[derive(Args, Debug)]
pub struct ReformatArgs {
    /// Backup file. Defaults to `$QUILL_INPUT`, then `./backup.json`.
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Destination file. Prints to stdout when omitted.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Execute the reformat subcommand.
pub fn run_reformat(args: &ReformatArgs, config: &CliConfig) -> Result<u8> {
    let input = config.input_or(args.input.as_deref());
    let backup = crate::read_backup(&input)?;
    let text = quill_schema::encode(&backup).context("failed to encode backup")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "backup reformatted");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}").context("failed to write to stdout")?;
        }
    }
    Ok(0)
}
