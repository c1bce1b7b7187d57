//! Numeric normalization for weights and piece counts.

/// Parses a string as f64, returning None for invalid or empty strings.
///
/// Thousands separators are accepted when every group after the first has
/// exactly three digits (`1,250.5`); anything else with a comma is rejected.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = trimmed.parse::<f64>() {
        return parsed.is_finite().then_some(parsed);
    }
    if !trimmed.contains(',') {
        return None;
    }
    let integer_part = trimmed.split('.').next().unwrap_or_default();
    let mut groups = integer_part.split(',');
    let first = groups.next().unwrap_or_default();
    if first.is_empty() || groups.any(|group| group.len() != 3) {
        return None;
    }
    let parsed = trimmed.replace(',', "").parse::<f64>().ok()?;
    parsed.is_finite().then_some(parsed)
}

/// Weight in kilograms. Unparseable, negative and non-finite values become
/// `0.0`; the flag reports whether the raw value was usable.
pub fn normalize_weight(value: Option<&str>) -> (f64, bool) {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => (0.0, true),
        Some(raw) => match parse_f64(raw) {
            Some(weight) if weight > 0.0 => (weight, true),
            Some(weight) if weight == 0.0 => (0.0, true),
            _ => (0.0, false),
        },
    }
}

/// Piece count; spreadsheet floats such as `3.0` are truncated.
pub fn normalize_pieces(value: Option<&str>) -> i64 {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return 0;
    };
    if let Ok(pieces) = raw.parse::<i64>() {
        return pieces.max(0);
    }
    match parse_f64(raw) {
        Some(pieces) if pieces >= 0.0 && pieces < i64::MAX as f64 => pieces.trunc() as i64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_are_non_negative() {
        assert_eq!(normalize_weight(Some(" 12.5 ")), (12.5, true));
        assert_eq!(normalize_weight(Some("1,250.5")), (1250.5, true));
        assert_eq!(normalize_weight(Some("-4")), (0.0, false));
        assert_eq!(normalize_weight(Some("heavy")), (0.0, false));
        assert_eq!(normalize_weight(Some("12,5")), (0.0, false));
        assert_eq!(normalize_weight(Some("inf")), (0.0, false));
        assert_eq!(normalize_weight(None), (0.0, true));
    }

    #[test]
    fn pieces_accept_float_text() {
        assert_eq!(normalize_pieces(Some("3")), 3);
        assert_eq!(normalize_pieces(Some("3.0")), 3);
        assert_eq!(normalize_pieces(Some("-2")), 0);
        assert_eq!(normalize_pieces(Some("n/a")), 0);
    }
}
