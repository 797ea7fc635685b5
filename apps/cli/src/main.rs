mod args;
mod handlers;

use crate::args::{Cli, Command};
use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use twin::codec::Canonicalizer;
use twin::domain::config::TwinConfig;
use twin::kernel::config::load_config;
use twin_logger::Logger;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut cfg: TwinConfig =
        load_config(cli.config.as_ref()).context("Critical: Configuration is malformed")?;
    match cli.verbose {
        0 => {},
        1 => cfg.logging.level = "debug".to_owned(),
        _ => cfg.logging.level = "trace".to_owned(),
    }
    let _logger = Logger::from_config(&cfg.logging)?;

    let canonicalizer = Canonicalizer::from_config(&cfg.serializer);

    match cli.command {
        Command::Canonicalize { input, output, compact } => {
            let canonicalizer = canonicalizer.pretty(cfg.serializer.pretty && !compact);
            handlers::canonicalize::run(canonicalizer, &input, output.as_deref())?;
        },
        Command::Check { input } => {
            if !handlers::check::run(canonicalizer, &input)? {
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Plan { input } => handlers::plan::run(&input)?,
    }

    Ok(ExitCode::SUCCESS)
}
