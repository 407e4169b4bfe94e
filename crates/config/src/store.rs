//! Key-value stores that receive parsed entries.
//!
//! Responsibilities:
//! - Define the `EnvStore` seam the parser writes into and the loader reads from.
//! - Provide `ProcessEnv`, the adapter over the real process environment table.
//! - Provide `MemoryStore`, an isolated map for tests and embedding.
//!
//! Does NOT handle:
//! - Line parsing (see `parser.rs`).
//! - Empty-value policy (applied by the loader accessors, not the store).
//!
//! Invariants:
//! - `set` always overwrites an existing value for the same key.
//! - Callers only pass keys that are non-empty and free of `=` and NUL, and values
//!   free of NUL (enforced by the parser).

use std::collections::HashMap;

/// Destination mapping for parsed entries.
pub trait EnvStore {
    /// Returns the value for `key`, or `None` if it is unset.
    fn get(&self, key: &str) -> Option<String>;

    /// Inserts `key` with `value`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);
}

impl<S: EnvStore + ?Sized> EnvStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

/// The process environment variable table.
///
/// Values written here are visible to child processes and to anything else
/// reading `std::env`. Mutation is process-global and not synchronized.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        // Non-UTF-8 values are reported as unset.
        std::env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        // SAFETY: the loader is single-threaded by contract; callers that share the
        // process environment across threads must serialize access externally.
        unsafe {
            std::env::set_var(key, value);
        }
    }
}

/// An in-memory store isolated from the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns all entries sorted by key.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        pairs
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.entries
    }
}

impl EnvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
