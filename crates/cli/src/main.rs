//! envload - Command-line front end for `.env` loading.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Initialize logging.
//! - Run the selected command and turn its outcome into a process exit code.
//!
//! Does NOT handle:
//! - Parsing or loading logic (see `crates/config`).
//!
//! Invariants:
//! - Logging goes to stderr so stdout carries only command output.
//! - `get --required` on a missing key aborts via panic (exit status 101).

mod args;
mod commands;
mod dispatch;
mod error;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::ExitCodeExt;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run_command(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code().as_i32()
        }
    };

    std::process::exit(exit_code);
}
