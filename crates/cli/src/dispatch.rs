//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//! - Build the loader each command needs and print command output.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Mapping errors to exit codes (see `main()` and `error`).
//!
//! Invariants:
//! - `get` and `run` write into the process environment; `list` never does.
//! - Command output goes to stdout; diagnostics go to stderr.

use anyhow::Result;
use envload_config::EnvLoader;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::commands::get::Lookup;
use crate::error::ExitCode;

/// Dispatch CLI commands to their respective handlers.
///
/// Returns the process exit code on success.
pub(crate) fn run_command(cli: Cli) -> Result<i32> {
    let options = cli.parse_options();

    match cli.command {
        Commands::Get {
            key,
            fallback,
            or_default,
            required,
        } => {
            let mut loader = EnvLoader::new().with_options(options);
            let lookup = Lookup::from_flags(fallback, or_default, required);
            let value = commands::get::run(&mut loader, &cli.files, &key, &lookup)?;
            println!("{}", value);
        }
        Commands::List { keys_only } => {
            let output = commands::list::run(&cli.files, options, keys_only)?;
            print!("{}", output);
        }
        Commands::Run { command } => {
            let mut loader = EnvLoader::new().with_options(options);
            return commands::run::run(&mut loader, &cli.files, &command);
        }
    }

    Ok(ExitCode::Success.as_i32())
}
