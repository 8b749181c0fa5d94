//! Display-name normalization.

/// Normalizes a display name.
///
/// Trims surrounding whitespace and upper-cases the first character, leaving
/// the rest untouched. A blank input yields an empty string.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
