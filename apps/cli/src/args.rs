//! # CLI Argument Definitions
//!
//! Subcommands, arguments and flags of the `twin` binary.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Reads `-` as standard input.
pub(crate) const STDIN: &str = "-";

#[derive(Debug, Parser)]
#[command(name = "twin")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Canonicalize submodel JSON and inspect production plans")]
pub(crate) struct Cli {
    /// Configuration file (TOML, JSON or YAML); `twin.*` in the working directory otherwise
    #[arg(short, long, global = true, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Raise the log level (`-v` debug, `-vv` trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub(crate) verbose: u8,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Rewrite a submodel document into its canonical form
    Canonicalize {
        /// Input document, `-` for stdin
        input: PathBuf,
        /// Write the result here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Single-line output
        #[arg(long)]
        compact: bool,
    },
    /// Report whether a document is already canonical
    Check {
        /// Input document, `-` for stdin
        input: PathBuf,
    },
    /// Print the steps, actions and states of a production plan
    Plan {
        /// Production plan submodel, `-` for stdin
        input: PathBuf,
    },
}
