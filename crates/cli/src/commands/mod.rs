//! CLI command implementations.

pub mod get;
pub mod list;
pub mod run;

use anyhow::{Context, Result};
use envload_config::{EnvLoader, EnvStore};
use std::path::PathBuf;

/// Load the files given with `-f`, in order.
///
/// With no files, nothing is loaded here: accessors fall back to the
/// implicit `.env` load.
pub(crate) fn load_explicit<S: EnvStore>(loader: &mut EnvLoader<S>, files: &[PathBuf]) -> Result<()> {
    if files.is_empty() {
        return Ok(());
    }
    loader
        .load_files(files)
        .context("Failed to load env files")
}
