//! Value normalization: extract a numeric magnitude from a raw result
//! string. Single shared implementation for chart plotting and trend
//! computation so display and analysis can never diverge.

use std::sync::LazyLock;

use regex::Regex;

/// Titer-shaped result, optionally prefixed with `<`: `1:40`, `<1:40`.
static RE_TITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<?\s*1\s*:\s*(\d+)\s*$").unwrap());

/// Trailing qualifier words and everything after them: `5.6 OR LESS`,
/// `0.9 NEGATIVE`.
static RE_QUALIFIER_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(?:OR|AND|NEG(?:ATIVE)?|POS(?:ITIVE)?)\b.*$").unwrap()
});

static RE_LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\d+\.?\d*").unwrap());

/// Dilution denominator of a titer-shaped string: `1:320` → 320.
pub fn titer_value(raw: &str) -> Option<f64> {
    RE_TITER
        .captures(raw)
        .and_then(|caps| caps[1].parse::<f64>().ok())
}

/// Extract the numeric magnitude of a raw result string.
///
/// Titer results yield their dilution denominator. Otherwise comparison
/// operators and trailing qualifier words are stripped and the leading
/// numeric token is parsed. None means "exclude from numeric series";
/// callers must never coerce it to zero.
pub fn extract_numeric(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    // Thousands separators defeat both the titer and the number regex.
    let cleaned = raw.replace(',', "");

    if let Some(v) = titer_value(&cleaned) {
        return Some(v);
    }

    let stripped = cleaned.trim_start_matches(['<', '>', '\u{2264}', '\u{2265}', '=', ' ']);
    let cut = RE_QUALIFIER_TAIL.replace(stripped, "");

    RE_LEADING_NUMBER
        .find(cut.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titer_returns_denominator() {
        assert_eq!(extract_numeric(Some("1:320")), Some(320.0));
        assert_eq!(extract_numeric(Some("<1:40")), Some(40.0));
        assert_eq!(extract_numeric(Some("1 : 80")), Some(80.0));
    }

    #[test]
    fn comparison_operators_are_stripped() {
        assert_eq!(extract_numeric(Some("<5.6")), Some(5.6));
        assert_eq!(extract_numeric(Some(">120")), Some(120.0));
        assert_eq!(extract_numeric(Some("\u{2264}0.9")), Some(0.9));
    }

    #[test]
    fn trailing_qualifiers_are_cut() {
        assert_eq!(extract_numeric(Some("5.6 OR LESS")), Some(5.6));
        assert_eq!(extract_numeric(Some("0.9 NEGATIVE")), Some(0.9));
    }

    #[test]
    fn thousands_separators_are_removed() {
        assert_eq!(extract_numeric(Some("1,205")), Some(1205.0));
    }

    #[test]
    fn categorical_results_are_not_numbers() {
        assert_eq!(extract_numeric(Some("NEGATIVE")), None);
        assert_eq!(extract_numeric(Some("Pattern A")), None);
    }

    #[test]
    fn absent_or_empty_yields_none() {
        assert_eq!(extract_numeric(None), None);
        assert_eq!(extract_numeric(Some("")), None);
        assert_eq!(extract_numeric(Some("  ")), None);
    }

    #[test]
    fn negative_magnitudes_parse() {
        assert_eq!(extract_numeric(Some("-1.8")), Some(-1.8));
    }
}
