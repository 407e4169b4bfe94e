//! Run command implementation.
//!
//! Responsibilities:
//! - Load sources into the process environment and start a child command that inherits it.
//!
//! Invariants:
//! - The child's exit status is returned unchanged; a signal-terminated child maps to 1.

use anyhow::{Context, Result};
use envload_config::{EnvLoader, EnvStore};
use std::path::PathBuf;
use std::process::Command;

use crate::error::ExitCode;

pub fn run<S: EnvStore>(loader: &mut EnvLoader<S>, files: &[PathBuf], command: &[String]) -> Result<i32> {
    loader
        .load_files(files)
        .context("Failed to load env files")?;

    let (program, args) = command.split_first().context("No command given")?;
    tracing::debug!(program = %program, args = args.len(), "Starting child process");

    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("Failed to start {}", program))?;

    Ok(status.code().unwrap_or(ExitCode::GeneralError.as_i32()))
}
