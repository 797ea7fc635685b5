pub(crate) mod canonicalize;
pub(crate) mod check;
pub(crate) mod plan;

use crate::args::STDIN;
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Reads a whole document from a file or, for `-`, from stdin.
pub(crate) fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == STDIN {
        let mut buffer = String::new();
        std::io::stdin().lock().read_to_string(&mut buffer).context("Failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}
