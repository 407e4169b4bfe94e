//! Error types for environment file loading.
//!
//! Responsibilities:
//! - Define the two failure kinds of the loader: unreadable sources and missing keys.
//! - Provide constructors that attach the source name to I/O failures.
//!
//! Does NOT handle:
//! - Malformed lines (the parser skips them; they are never errors).
//! - Process exit codes (see the CLI crate's `error.rs`).
//!
//! Invariants:
//! - Error messages NEVER include raw line contents or values, only source names and keys.

use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading or resolving environment entries.
#[derive(Error, Debug)]
pub enum EnvError {
    /// A source could not be opened or read.
    #[error("Failed to read env source {source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    /// The key is absent from the store, or its value is empty.
    #[error("Env key {key} not set")]
    NotFound { key: String },
}

impl EnvError {
    pub(crate) fn io(source_name: impl Into<String>, source: std::io::Error) -> Self {
        EnvError::Io {
            source_name: source_name.into(),
            source,
        }
    }

    pub(crate) fn file(path: &Path, source: std::io::Error) -> Self {
        Self::io(path.display().to_string(), source)
    }

    pub(crate) fn not_found(key: &str) -> Self {
        EnvError::NotFound {
            key: key.to_string(),
        }
    }

    /// Returns true if this error reports a missing or empty key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EnvError::NotFound { .. })
    }

    /// Returns the underlying I/O error kind, if this is an I/O failure.
    pub fn io_kind(&self) -> Option<ErrorKind> {
        match self {
            EnvError::Io { source, .. } => Some(source.kind()),
            EnvError::NotFound { .. } => None,
        }
    }
}
