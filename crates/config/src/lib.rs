//! Environment file loading for envload.
//!
//! This crate parses `.env`-format sources (`KEY=VALUE` lines) into an
//! environment-like store and resolves keys with fallback policies.

pub mod constants;
mod loader;
pub mod parser;
pub mod store;

pub use loader::{EnvError, EnvLoader};
pub use parser::{Entry, ParseOptions, parse_into, parse_line, parse_str};
pub use store::{EnvStore, MemoryStore, ProcessEnv};
