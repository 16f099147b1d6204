//! Helpers shared by scale formulas.
//!
//! Formulas receive freeform values as raw text and must coerce them
//! themselves; these helpers make the fallback explicit at each call site.

use medscale_core::models::result::format_number;
use medscale_core::models::score::Score;
use medscale_core::models::values::ValuesMap;

/// Parse raw freeform text as a finite number. Surrounding whitespace is
/// ignored; empty, non-numeric, and non-finite input yield `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse raw freeform text, falling back to `default` when unusable.
pub fn number_or(raw: &str, default: f64) -> f64 {
    parse_number(raw).unwrap_or(default)
}

/// Sum of every extracted weight: the canonical multi-select formula.
/// Zero when nothing is selected.
pub fn sum_of_weights(values: &ValuesMap) -> Score {
    Score::new(values.iter().map(|(_, value)| value.weight()).sum())
}

/// `"{score}/{max}"`, for scales that show the total against its maximum.
pub fn out_of(score: &Score, max: f64) -> String {
    format!("{}/{}", format_number(score.value), format_number(max))
}

/// Raw freeform text for display, with a placeholder for empty input.
pub fn shown(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.is_empty() { "-" } else { trimmed }
}
