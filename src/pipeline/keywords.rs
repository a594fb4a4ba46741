//! Keyword vocabularies backing the classification heuristics.
//!
//! These are the textual conventions of one portal, not a general lab
//! vocabulary. Kept as flat tables so each list can be unit-tested and
//! extended when the diagnostic log reports an unmatched format.

/// Results that are a pass/fail answer. Longer tokens first so that
/// substring scans report the most specific match.
pub const BINARY_KEYWORDS: &[&str] = &[
    "NON-REACTIVE",
    "NOT DETECTED",
    "NONE SEEN",
    "NEGATIVE",
    "POSITIVE",
    "REACTIVE",
    "DETECTED",
];

/// Descriptive categorical results (urinalysis color/clarity, general
/// normal/abnormal impressions).
pub const DESCRIPTIVE_KEYWORDS: &[&str] = &["CLEAR", "YELLOW", "NORMAL", "ABNORMAL"];

/// Test names reported as dilution titers even when a single capture
/// shows only the numeric half.
pub const TITER_TEST_NAMES: &[&str] = &[
    "TITER",
    "ANTINUCLEAR",
    "ANA SCREEN",
    "RHEUMATOID FACTOR",
    "RPR",
];

/// Test names whose result is a categorical grade (e.g. LDL Pattern A/B).
pub const PATTERN_TEST_NAMES: &[&str] = &["PATTERN", "GENOTYPE", "PHENOTYPE"];

/// Test names reported as percentages even when the scraped unit field
/// is blank.
pub const PERCENTAGE_TEST_NAMES: &[&str] = &[
    "A1C",
    "SATURATION",
    "PERCENT",
    "FREE PSA",
];

/// Case-insensitive substring scan of `text` against a keyword table.
pub fn contains_keyword(text: &str, keywords: &[&str]) -> bool {
    let upper = text.to_uppercase();
    keywords.iter().any(|k| upper.contains(k))
}

/// True when the string matches the categorical result vocabulary
/// (binary or descriptive).
pub fn is_categorical_token(text: &str) -> bool {
    contains_keyword(text, BINARY_KEYWORDS) || contains_keyword(text, DESCRIPTIVE_KEYWORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_scan_is_case_insensitive() {
        assert!(contains_keyword("negative", BINARY_KEYWORDS));
        assert!(contains_keyword("Non-Reactive", BINARY_KEYWORDS));
        assert!(contains_keyword("NONE SEEN", BINARY_KEYWORDS));
        assert!(!contains_keyword("1.5", BINARY_KEYWORDS));
    }

    #[test]
    fn descriptive_matches_abnormal_via_substring() {
        // ABNORMAL contains NORMAL; either way it is descriptive.
        assert!(contains_keyword("ABNORMAL", DESCRIPTIVE_KEYWORDS));
        assert!(contains_keyword("Yellow", DESCRIPTIVE_KEYWORDS));
    }

    #[test]
    fn titer_names_match_by_substring() {
        assert!(contains_keyword("ANA Titer", TITER_TEST_NAMES));
        assert!(contains_keyword("Rheumatoid Factor", TITER_TEST_NAMES));
        assert!(!contains_keyword("Glucose", TITER_TEST_NAMES));
    }

    #[test]
    fn categorical_vocabulary_spans_both_tables() {
        assert!(is_categorical_token("NEGATIVE"));
        assert!(is_categorical_token("Clear"));
        assert!(!is_categorical_token("7-25"));
    }
}
