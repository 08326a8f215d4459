//! # Validate Subcommand
//!
//! Decodes a backup and prints a one-line summary. Any schema violation is
//! reported with the offending key and value.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use quill_core::Backup;

use crate::config::CliConfig;

/// Arguments for the `quill validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Backup file. Defaults to `$QUILL_INPUT`, then `./backup.json`.
    #[arg(long, short)]
    pub input: Option<PathBuf>,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig) -> Result<u8> {
    let path = config.input_or(args.input.as_deref());
    let backup = crate::read_backup(&path)?;
    println!("{}: {}", path.display(), summary(&backup));
    Ok(0)
}

/// One-line description of a backup's contents.
pub fn summary(backup: &Backup) -> String {
    format!(
        "version {}, {} notes, {} notebooks, {} id mappings",
        backup.schema_version,
        backup.notes.len(),
        backup.notebooks.len(),
        backup.id_mappings.len()
    )
}
