use crate::safe_nanoid;

/// Builds an absolute submodel identifier from a configured prefix.
///
/// A `/` is inserted when the prefix does not already end with a path or URN separator.
#[must_use]
pub fn submodel_identifier(prefix: &str) -> String {
    let id = safe_nanoid!();
    if prefix.is_empty() || prefix.ends_with(['/', ':', '#']) {
        format!("{prefix}{id}")
    } else {
        format!("{prefix}/{id}")
    }
}
