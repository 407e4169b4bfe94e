//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map EnvError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Exit statuses of commands started by `envload run` (passed through unchanged).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - `get --required` aborts with a panic instead of returning one of these codes.

use envload_config::EnvError;

/// Structured exit codes for envload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Source error - an env file could not be opened or read.
    ///
    /// Scripts should check the file path and permissions.
    SourceError = 3,

    /// Key not found - absent or set to an empty value.
    NotFound = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&EnvError> for ExitCode {
    fn from(err: &EnvError) -> Self {
        match err {
            EnvError::Io { .. } => ExitCode::SourceError,
            EnvError::NotFound { .. } => ExitCode::NotFound,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no EnvError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<EnvError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}
