//! Text and token normalization.

use std::collections::BTreeSet;

/// Separators between SHC codes and between import-status tokens.
pub const TOKEN_SEPARATORS: [char; 5] = [' ', ',', ';', '|', '/'];

/// Trims and upper-cases a value; absent values and spreadsheet `nan`
/// placeholders become the empty string.
pub fn normalize_text(value: Option<&str>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let trimmed = value.trim().trim_start_matches('\u{feff}').trim();
    if trimmed.eq_ignore_ascii_case("nan") {
        return String::new();
    }
    trimmed.to_uppercase()
}

/// Like [`normalize_text`] with internal whitespace runs collapsed to a
/// single space.
pub fn normalize_description(value: Option<&str>) -> String {
    normalize_text(value)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits on [`TOKEN_SEPARATORS`], upper-cases and drops empty tokens.
pub fn split_tokens(value: &str) -> BTreeSet<String> {
    value
        .split(|c: char| TOKEN_SEPARATORS.contains(&c) || c.is_whitespace())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_uppercase)
        .collect()
}
