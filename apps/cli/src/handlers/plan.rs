use super::read_input;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use twin::production::ProductionPlan;

/// Parses a production plan and prints an indented overview.
///
/// # Errors
/// Unreadable input, or a document that is not a submodel object.
pub(crate) fn run(input: &Path) -> Result<()> {
    let source = read_input(input)?;
    let plan = ProductionPlan::parse_str(&source)
        .with_context(|| format!("Failed to parse production plan {}", input.display()))?;
    let tree = plan.tree();

    let mut out = std::io::stdout().lock();
    writeln!(out, "Plan {}", plan.identifier())?;
    match plan.quantity() {
        Some(quantity) => writeln!(out, "  quantity: {quantity}")?,
        None => writeln!(out, "  quantity: -")?,
    }
    writeln!(out, "  finished: {}", plan.is_finished())?;
    writeln!(out, "  completed: {}", plan.is_completed())?;

    for step in plan.steps() {
        writeln!(out, "{:<12} {:<10} {}", step.id_short(tree), step.status(tree).as_str(), step.title(tree))?;
        for action in step.actions(tree) {
            writeln!(
                out,
                "  {:<10} {:<10} {}",
                action.id_short(tree),
                action.status(tree).as_str(),
                action.title(tree)
            )?;
        }
    }
    Ok(())
}
