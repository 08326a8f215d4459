//! # Configuration
//!
//! Default paths, overridable through the environment and then through
//! command-line flags.
//!
//! Variables:
//! - `QUILL_INPUT` (default: `./backup.json`)
//! - `QUILL_OUTPUT_DIR` (default: `./notes`)

use std::path::{Path, PathBuf};

/// Environment variable naming the backup file.
pub const INPUT_ENV: &str = "QUILL_INPUT";
/// Environment variable naming the export folder.
pub const OUTPUT_DIR_ENV: &str = "QUILL_OUTPUT_DIR";

const DEFAULT_INPUT: &str = "./backup.json";
const DEFAULT_OUTPUT_DIR: &str = "./notes";

/// Paths a command falls back to when no flag is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Backup file to read.
    pub input: PathBuf,
    /// Base folder for exported notes.
    pub output_dir: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl CliConfig {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` to read variables. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |var: &str, default: &str| {
            lookup(var)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };
        Self {
            input: read(INPUT_ENV, DEFAULT_INPUT),
            output_dir: read(OUTPUT_DIR_ENV, DEFAULT_OUTPUT_DIR),
        }
    }

    /// The backup file, preferring an explicit flag.
    pub fn input_or(&self, flag: Option<&Path>) -> PathBuf {
        flag.map_or_else(|| self.input.clone(), Path::to_path_buf)
    }

    /// The export folder, preferring an explicit flag.
    pub fn output_dir_or(&self, flag: Option<&Path>) -> PathBuf {
        flag.map_or_else(|| self.output_dir.clone(), Path::to_path_buf)
    }
}
