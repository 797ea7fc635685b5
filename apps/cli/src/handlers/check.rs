use super::read_input;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use twin::codec::Canonicalizer;

/// Prints whether `input` is canonical and returns the verdict.
///
/// # Errors
/// Unreadable input, invalid JSON, or a legacy key surviving the pass.
pub(crate) fn run(canonicalizer: Canonicalizer, input: &Path) -> Result<bool> {
    let source = read_input(input)?;
    let canonical = canonicalizer
        .is_canonical(&source)
        .with_context(|| format!("Failed to check {}", input.display()))?;

    let verdict = if canonical { "canonical" } else { "not canonical" };
    writeln!(std::io::stdout().lock(), "{}: {verdict}", input.display())?;
    Ok(canonical)
}
