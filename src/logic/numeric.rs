use crate::models::RawValue;

const CURRENCY_GLYPH: char = '₹';

/// Coerce a cell or answer to a number. `None` is the not-a-number result,
/// distinct from `Some(0.0)`.
pub fn parse_numeric(value: &RawValue) -> Option<f64> {
    match value {
        RawValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
        RawValue::Text(s) => parse_numeric_str(s),
        RawValue::Null | RawValue::Bool(_) => None,
    }
}

/// Strip commas, the rupee glyph and surrounding whitespace, then parse.
/// Handles both `1,200` and lakh-style `1,20,000` grouping.
pub fn parse_numeric_str(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| *c != ',' && *c != CURRENCY_GLYPH)
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}
