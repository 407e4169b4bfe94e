//! Shared test utilities for envload integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory rooted in a temporary directory.
//!
//! Invariants / Assumptions:
//! - Each command runs with its working directory set to the given temp dir,
//!   so the default `.env` lookup never sees the developer's files.
//! - Keys used by the tests are removed from the inherited environment.

use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// Keys the integration tests assert on; cleared to avoid host leakage.
pub const TEST_KEYS: &[&str] = &["FOO", "BAZ", "PORT", "EMPTY", "SECRET", "MISSING"];

/// Returns a hermetic `envload` command running inside `dir`.
pub fn envload_cmd(dir: &TempDir) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envload");
    cmd.current_dir(dir.path());
    cmd.env_remove("RUST_LOG");
    for key in TEST_KEYS {
        cmd.env_remove(key);
    }
    cmd
}

/// Writes `contents` to `name` inside `dir`.
pub fn write_env(dir: &TempDir, name: &str, contents: &str) {
    fs::write(dir.path().join(name), contents).expect("Failed to write env file");
}
