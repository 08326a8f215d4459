//! # Export Subcommand
//!
//! Decodes a backup and writes each note to
//! `<output>/<notebook>/<title>.md`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use quill_export::{ExportOptions, MissingNotebookPolicy};

use crate::config::CliConfig;

/// Arguments for the `quill export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Backup file. Defaults to `$QUILL_INPUT`, then `./backup.json`.
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Base folder for the exported notes. Defaults to `$QUILL_OUTPUT_DIR`,
    /// then `./notes`.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// What to do with notes whose notebook is missing from the backup.
    #[arg(long, default_value = "fail")]
    pub missing_notebook: MissingNotebook,

    /// Attempt every note and report all write failures at the end.
    #[arg(long)]
    pub keep_going: bool,
}

/// Command-line spelling of [`MissingNotebookPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MissingNotebook {
    /// Stop the export with an error.
    Fail,
    /// Put the note directly in the base folder.
    BaseFolder,
}

impl From<MissingNotebook> for MissingNotebookPolicy {
    fn from(value: MissingNotebook) -> Self {
        match value {
            MissingNotebook::Fail => Self::Fail,
            MissingNotebook::BaseFolder => Self::BaseFolder,
        }
    }
}

impl ExportArgs {
    fn options(&self) -> ExportOptions {
        ExportOptions {
            missing_notebook: self.missing_notebook.into(),
            keep_going: self.keep_going,
        }
    }
}

/// Execute the export subcommand.
pub fn run_export(args: &ExportArgs, config: &CliConfig) -> Result<u8> {
    let input = config.input_or(args.input.as_deref());
    let output = config.output_dir_or(args.output.as_deref());
    let backup = crate::read_backup(&input)?;

    let report = quill_export::export(&backup, &output, &args.options(), &mut rand::thread_rng())
        .with_context(|| format!("export to {} failed", output.display()))?;

    println!("wrote {} notes to {}", report.written, output.display());
    if report.collisions > 0 {
        println!(
            "{} notes shared a file name with an earlier note and replaced it",
            report.collisions
        );
    }
    Ok(0)
}
