//! Reference range parsing: turn the portal's raw reference-range
//! strings into typed descriptors.
//!
//! Patterns are tried in strict priority order because several formats
//! are textual substrings of others (a titer `<1:40` would otherwise
//! parse as a bare `<` threshold). Parsing is total: every non-empty
//! string maps to exactly one variant, with `Unknown` as the fallback.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::keywords::is_categorical_token;

/// Typed descriptor of a reference range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReferenceData {
    /// Normal values lie in `[lower, upper]`.
    Band { lower: f64, upper: f64 },
    /// One-sided range: `Upper` means normal is at/below the value,
    /// `Lower` means normal is at/above it.
    Threshold {
        direction: ThresholdDirection,
        value: f64,
        inclusive: bool,
        qualifier: Option<String>,
    },
    /// Dilution-ratio bound, e.g. `<1:40`.
    Titer { threshold: f64, is_upper_bound: bool },
    /// Expected categorical result, e.g. `NEGATIVE`.
    Categorical { expected: String },
    /// Expected grade/pattern token, e.g. `A`.
    Pattern { expected: String },
    /// Unrecognized format, preserved verbatim for display.
    Unknown { raw: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdDirection {
    Upper,
    Lower,
}

static RE_TITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(<)?\s*(\d+)\s*:\s*(\d+)\s*$").unwrap());

/// Signed/z-score range: requires an explicit sign on at least one
/// bound, which disambiguates it from an ordinary `N-N` range.
static RE_SIGNED_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(-?\d+\.?\d*)\s*-\s*([+-])?\s*(\d+\.?\d*)\s*$").unwrap()
});

static RE_PLAIN_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+\.?\d*)\s*-\s*(\d+\.?\d*)\s*$").unwrap());

static RE_UPPER_INCLUSIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:\u{2264}|<\s*(?:or\s+)?=)\s*(\d+\.?\d*)\s*$").unwrap()
});

static RE_LOWER_INCLUSIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:\u{2265}|>\s*(?:or\s+)?=)\s*(\d+\.?\d*)\s*$").unwrap()
});

/// `< N` with optional trailing free text (the qualifier).
static RE_UPPER_EXCLUSIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<\s*(\d+\.?\d*)\s*(.*)$").unwrap());

static RE_LOWER_EXCLUSIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*>\s*(\d+\.?\d*)\s*$").unwrap());

static RE_PATTERN_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{1,10}$").unwrap());

/// Parse a raw reference-range string into a typed descriptor.
/// Returns None only for absent/empty input; any other string maps to
/// exactly one variant.
pub fn parse_reference_range(raw: Option<&str>) -> Option<ReferenceData> {
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // 1. Titer bound: `<1:40`, `1:40`.
    if let Some(caps) = RE_TITER.captures(trimmed) {
        if let Ok(threshold) = caps[3].parse::<f64>() {
            return Some(ReferenceData::Titer {
                threshold,
                is_upper_bound: caps.get(1).is_some(),
            });
        }
    }

    // 2. Signed/z-score range: `-2.0 - +2.0`. Sorted, unlike the plain
    //    range below, because signed bounds arrive in either order.
    if let Some(caps) = RE_SIGNED_RANGE.captures(trimmed) {
        let explicit_sign = caps.get(2).is_some();
        if let (Ok(a), Ok(b)) = (caps[1].parse::<f64>(), caps[3].parse::<f64>()) {
            let b = if caps.get(2).is_some_and(|s| s.as_str() == "-") {
                -b
            } else {
                b
            };
            if a < 0.0 || explicit_sign {
                return Some(ReferenceData::Band {
                    lower: a.min(b),
                    upper: a.max(b),
                });
            }
        }
    }

    // 3. Plain numeric range, written order preserved (source always
    //    lists the lower bound first).
    if let Some(caps) = RE_PLAIN_RANGE.captures(trimmed) {
        if let (Ok(lower), Ok(upper)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
            return Some(ReferenceData::Band { lower, upper });
        }
    }

    // 4/5. Inclusive thresholds: `<=`, `≤`, `< OR =` / `>=`, `≥`, `> OR =`.
    if let Some(caps) = RE_UPPER_INCLUSIVE.captures(trimmed) {
        if let Ok(value) = caps[1].parse::<f64>() {
            return Some(ReferenceData::Threshold {
                direction: ThresholdDirection::Upper,
                value,
                inclusive: true,
                qualifier: None,
            });
        }
    }
    if let Some(caps) = RE_LOWER_INCLUSIVE.captures(trimmed) {
        if let Ok(value) = caps[1].parse::<f64>() {
            return Some(ReferenceData::Threshold {
                direction: ThresholdDirection::Lower,
                value,
                inclusive: true,
                qualifier: None,
            });
        }
    }

    // 6. Exclusive upper bound, optionally qualified: `<150 (optimal)`.
    if let Some(caps) = RE_UPPER_EXCLUSIVE.captures(trimmed) {
        if let Ok(value) = caps[1].parse::<f64>() {
            let tail = caps[2].trim();
            return Some(ReferenceData::Threshold {
                direction: ThresholdDirection::Upper,
                value,
                inclusive: false,
                qualifier: (!tail.is_empty()).then(|| tail.to_string()),
            });
        }
    }

    // 7. Exclusive lower bound.
    if let Some(caps) = RE_LOWER_EXCLUSIVE.captures(trimmed) {
        if let Ok(value) = caps[1].parse::<f64>() {
            return Some(ReferenceData::Threshold {
                direction: ThresholdDirection::Lower,
                value,
                inclusive: false,
                qualifier: None,
            });
        }
    }

    // 8. Categorical vocabulary.
    if is_categorical_token(trimmed) {
        return Some(ReferenceData::Categorical {
            expected: trimmed.to_string(),
        });
    }

    // 9. Short alphabetic token: a grade/pattern expectation.
    if RE_PATTERN_TOKEN.is_match(trimmed) {
        return Some(ReferenceData::Pattern {
            expected: trimmed.to_string(),
        });
    }

    // 10. Unmatched: keep raw text, log for vocabulary extension.
    tracing::debug!(raw = trimmed, "unmatched reference range format");
    Some(ReferenceData::Unknown {
        raw: trimmed.to_string(),
    })
}
