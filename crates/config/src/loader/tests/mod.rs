//! Tests for the environment loader.
//!
//! Responsibilities:
//! - Test explicit loading from readers and files, and source ordering.
//! - Test accessor policies and implicit default loading.
//! - Test the default `.env` file against the real process environment.
//!
//! Does NOT handle:
//! - Per-line syntax (tested in `parser.rs`).
//!
//! Invariants:
//! - Tests touching the process environment or working directory are `#[serial]`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::path::PathBuf;
use tempfile::TempDir;


/// RAII guard for temporarily changing the current working directory.
pub struct CwdGuard {
    original_dir: PathBuf,
}

impl CwdGuard {
    pub fn new(temp_dir: &TempDir) -> Self {
        let original_dir = std::env::current_dir().expect("Failed to get current directory");
        std::env::set_current_dir(temp_dir.path()).expect("Failed to set current directory");
        Self { original_dir }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}

/// Path of a `.env` file inside `temp_dir` that the test may or may not create.
pub fn env_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join(".env")
}
