//! Date normalization: canonicalize portal date strings to comparable
//! `YYYY-MM-DD` keys.

use std::sync::LazyLock;

use regex::Regex;

static RE_ISO_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})").unwrap());

/// Canonicalize a raw date string to a `YYYY-MM-DD` key.
///
/// A leading ISO date (with or without a time suffix) is truncated to
/// its date prefix. Anything else passes through unchanged rather than
/// failing hard, so unrecognized formats stay visible downstream.
/// Absent/empty input yields None. Idempotent by construction.
pub fn normalize_date(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }
    match RE_ISO_PREFIX.captures(raw) {
        Some(caps) => Some(caps[1].to_string()),
        None => Some(raw.to_string()),
    }
}
