//! Environment loader and accessor policies.
//!
//! Responsibilities:
//! - Own the `loaded` flag and the injected `EnvStore`.
//! - Load explicit sources (readers or files) in order, or the default `.env` file.
//! - Resolve keys with four policies: `get`, `must_get`, `get_or_fallback`, `get_or_default`.
//!
//! Does NOT handle:
//! - Line syntax (delegated to `parser.rs`).
//! - Aborting on a missing required key (the CLI does that at the process boundary).
//!
//! Invariants / Assumptions:
//! - `loaded` flips to true only after every source of a call parsed successfully,
//!   and never flips back.
//! - Accessors trigger an implicit default load until one succeeds; once loaded,
//!   no implicit load happens again. Explicit `load*` calls always parse.
//! - An empty value is treated exactly like an absent key.
//! - Files are closed before the load call returns, on every path.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use super::error::EnvError;
use crate::constants::DEFAULT_ENV_FILE;
use crate::parser::{ParseOptions, parse_source};
use crate::store::{EnvStore, ProcessEnv};

/// Loads environment sources into a store and resolves keys from it.
#[derive(Debug)]
pub struct EnvLoader<S = ProcessEnv> {
    store: S,
    loaded: bool,
    default_path: PathBuf,
    options: ParseOptions,
}

impl Default for EnvLoader<ProcessEnv> {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvLoader<ProcessEnv> {
    /// Create a loader that writes into the process environment.
    pub fn new() -> Self {
        Self::with_store(ProcessEnv)
    }
}

impl<S: EnvStore> EnvLoader<S> {
    /// Create a loader that writes into `store`.
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            loaded: false,
            default_path: PathBuf::from(DEFAULT_ENV_FILE),
            options: ParseOptions::default(),
        }
    }

    /// Override the file used when no explicit sources are given.
    ///
    /// Relative paths resolve against the working directory at load time.
    pub fn with_default_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_path = path.into();
        self
    }

    /// Set the parser options used for every source.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Parse each source into the store, in order.
    ///
    /// With no sources, the default file is loaded instead. Later sources
    /// overwrite duplicate keys from earlier ones.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::Io` if the default file cannot be opened or any
    /// source cannot be read. The `loaded` flag is left unchanged; entries
    /// from sources parsed before the failure stay in the store.
    pub fn load<I, R>(&mut self, sources: I) -> Result<(), EnvError>
    where
        I: IntoIterator<Item = R>,
        R: Read,
    {
        let mut sources = sources.into_iter().peekable();
        if sources.peek().is_none() {
            return self.load_default();
        }

        for (index, source) in sources.enumerate() {
            let source_name = format!("<source {}>", index + 1);
            let applied = parse_source(source, &mut self.store, &self.options, &source_name)?;
            tracing::debug!(source = %source_name, entries = applied, "Loaded env source");
        }

        self.loaded = true;
        Ok(())
    }

    /// Load the default file (`.env` unless overridden).
    ///
    /// # Errors
    ///
    /// Returns `EnvError::Io` if the file cannot be opened or read.
    pub fn load_default(&mut self) -> Result<(), EnvError> {
        let path = self.default_path.clone();
        self.load_file(&path)?;
        self.loaded = true;
        Ok(())
    }

    /// Open and parse each file, in order.
    ///
    /// With no paths, the default file is loaded instead.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::Io` naming the first path that could not be opened or read.
    pub fn load_files<I, P>(&mut self, paths: I) -> Result<(), EnvError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut paths = paths.into_iter().peekable();
        if paths.peek().is_none() {
            return self.load_default();
        }

        for path in paths {
            self.load_file(path.as_ref())?;
        }

        self.loaded = true;
        Ok(())
    }

    fn load_file(&mut self, path: &Path) -> Result<usize, EnvError> {
        let file = File::open(path).map_err(|e| EnvError::file(path, e))?;
        let source_name = path.display().to_string();
        let applied = parse_source(file, &mut self.store, &self.options, &source_name)?;
        tracing::debug!(source = %source_name, entries = applied, "Loaded env file");
        Ok(applied)
    }

    fn ensure_loaded(&mut self) -> Result<(), EnvError> {
        if self.loaded {
            return Ok(());
        }

        self.load_default().inspect_err(|e| {
            if e.io_kind() == Some(ErrorKind::NotFound) {
                tracing::debug!(path = %self.default_path.display(), "No default env file");
            } else {
                tracing::warn!(error = %e, "Implicit env load failed");
            }
        })
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.store.get(key).filter(|value| !value.is_empty())
    }

    /// Resolve `key`, loading the default file first if nothing is loaded yet.
    ///
    /// # Errors
    ///
    /// - `EnvError::Io` if the implicit load fails.
    /// - `EnvError::NotFound` if the key is absent or its value is empty.
    pub fn get(&mut self, key: &str) -> Result<String, EnvError> {
        self.ensure_loaded()?;
        self.lookup(key).ok_or_else(|| EnvError::not_found(key))
    }

    /// Resolve a key the program cannot run without.
    ///
    /// Resolution matches `get`; a failure is logged at error level. Callers at
    /// the process boundary decide whether to abort on the returned error.
    ///
    /// # Errors
    ///
    /// Same as `get`.
    pub fn must_get(&mut self, key: &str) -> Result<String, EnvError> {
        self.get(key)
            .inspect_err(|e| tracing::error!(key, error = %e, "Required env key unavailable"))
    }

    /// Resolve `key`, returning `fallback` on load failure or a missing/empty key.
    pub fn get_or_fallback(&mut self, key: &str, fallback: &str) -> String {
        self.get(key).unwrap_or_else(|_| fallback.to_string())
    }

    /// Resolve `key`, returning an empty string on load failure or a missing key.
    pub fn get_or_default(&mut self, key: &str) -> String {
        self.get_or_fallback(key, "")
    }
}
