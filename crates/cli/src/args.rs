//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Translate global flags into parser options.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not load sources (see `commands`).

use clap::{Parser, Subcommand};
use envload_config::ParseOptions;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "envload")]
#[command(about = "envload - Load .env files and resolve environment keys", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envload get DATABASE_URL\n  envload -f base.env -f local.env get PORT --fallback 8080\n  envload get API_KEY --required\n  envload list --keys-only\n  envload run -- ./server --port 8080\n"
)]
pub struct Cli {
    /// Environment file to load; repeat to load several in order (later files win).
    ///
    /// Defaults to `.env` in the current directory.
    #[arg(short = 'f', long = "file", global = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Treat an unquoted `#` in a value as the start of a trailing comment.
    #[arg(long, global = true)]
    pub strip_inline_comments: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default().with_inline_comments(self.strip_inline_comments)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value of a key
    Get {
        /// Key to resolve
        key: String,

        /// Value to print when the key is missing, empty, or nothing could be loaded
        #[arg(long, value_name = "VALUE", conflicts_with_all = ["or_default", "required"])]
        fallback: Option<String>,

        /// Print an empty line instead of failing when the key is missing
        #[arg(long, conflicts_with = "required")]
        or_default: bool,

        /// Abort the process if the key is missing or empty
        #[arg(long)]
        required: bool,
    },

    /// Print parsed entries sorted by key (files are not applied to the environment)
    List {
        /// Print keys only, without values
        #[arg(long)]
        keys_only: bool,
    },

    /// Run a command with the loaded entries in its environment
    Run {
        /// Command and arguments to run
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
        command: Vec<String>,
    },
}
