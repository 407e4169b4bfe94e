//! List command implementation.
//!
//! Responsibilities:
//! - Parse sources into an isolated store and render the entries sorted by key.
//!
//! Does NOT handle:
//! - Writing to the process environment (entries are only displayed).

use anyhow::{Context, Result};
use envload_config::{EnvLoader, MemoryStore, ParseOptions};
use std::path::PathBuf;

pub fn run(files: &[PathBuf], options: ParseOptions, keys_only: bool) -> Result<String> {
    let mut loader = EnvLoader::with_store(MemoryStore::new()).with_options(options);
    loader
        .load_files(files)
        .context("Failed to load env files")?;

    Ok(render(loader.store(), keys_only))
}

fn render(store: &MemoryStore, keys_only: bool) -> String {
    let mut output = String::new();
    for (key, value) in store.sorted() {
        if keys_only {
            output.push_str(key);
        } else {
            output.push_str(&format!("{}={}", key, value));
        }
        output.push('\n');
    }
    output
}
