//! Get command implementation.
//!
//! Responsibilities:
//! - Resolve one key with the policy selected by the CLI flags.
//!
//! Does NOT handle:
//! - Printing (see `dispatch`).
//!
//! Invariants:
//! - Files given with `-f` are loaded explicitly; a failure there is always an error,
//!   whatever the lookup policy.
//! - `Lookup::Required` goes through `must_get` and aborts the process on a miss.
//!   This is the only place a lookup failure panics; the library returns errors.

use anyhow::{Context, Result};
use envload_config::{EnvError, EnvLoader, EnvStore};
use std::path::PathBuf;

use super::load_explicit;

/// Lookup policy selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Missing or empty keys are reported as errors.
    Strict,
    /// Missing or empty keys abort the process.
    Required,
    /// Missing or empty keys resolve to the given value.
    Fallback(String),
    /// Missing or empty keys resolve to an empty string.
    Default,
}

impl Lookup {
    pub fn from_flags(fallback: Option<String>, or_default: bool, required: bool) -> Self {
        match (fallback, or_default, required) {
            (Some(value), _, _) => Lookup::Fallback(value),
            (None, true, _) => Lookup::Default,
            (None, false, true) => Lookup::Required,
            (None, false, false) => Lookup::Strict,
        }
    }
}

pub fn run<S: EnvStore>(
    loader: &mut EnvLoader<S>,
    files: &[PathBuf],
    key: &str,
    lookup: &Lookup,
) -> Result<String> {
    load_explicit(loader, files)?;

    let value = match lookup {
        Lookup::Strict => loader
            .get(key)
            .with_context(|| format!("Failed to resolve {}", key))?,
        Lookup::Required => abort_on_missing(loader.must_get(key)),
        Lookup::Fallback(fallback) => loader.get_or_fallback(key, fallback),
        Lookup::Default => loader.get_or_default(key),
    };

    Ok(value)
}

/// Turn a failed required lookup into an unrecoverable abort.
fn abort_on_missing(resolved: Result<String, EnvError>) -> String {
    match resolved {
        Ok(value) => value,
        Err(e) => panic!("{e}"),
    }
}
