//! Environment loader for `.env` files and in-memory sources.
//!
//! Responsibilities:
//! - Load `.env`-format sources into an injected `EnvStore` (the process environment by default).
//! - Provide accessors with required, fatal, fallback, and default policies.
//!
//! Does NOT handle:
//! - Line syntax (see `parser.rs`).
//! - Store implementations (see `store.rs`).
//!
//! Invariants / Assumptions:
//! - Implicit loads are retried by accessors until one succeeds.
//! - Explicit loads always parse, whatever the `loaded` flag says.

mod env_loader;
mod error;

pub use env_loader::EnvLoader;
pub use error::EnvError;

#[cfg(test)]
mod tests;
