use super::read_input;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;
use twin::codec::Canonicalizer;

/// Canonicalizes `input` and writes it to `output` or stdout.
///
/// # Errors
/// Unreadable input, invalid JSON, a legacy key surviving the pass, or a failed write.
pub(crate) fn run(canonicalizer: Canonicalizer, input: &Path, output: Option<&Path>) -> Result<()> {
    let source = read_input(input)?;
    let document = canonicalizer
        .canonicalize_str(&source)
        .with_context(|| format!("Failed to canonicalize {}", input.display()))?;
    let rendered = canonicalizer.format(&document)?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(output = %path.display(), "Canonical document written");
        },
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{rendered}")?;
        },
    }
    Ok(())
}
