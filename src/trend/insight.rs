//! Trend insight: at most one narrative-worthy observation per
//! biomarker, chosen by a prioritized rule list (first match wins).

use crate::models::{BiomarkerType, EventStatus, TimelineEvent, ValueType};
use crate::pipeline::classify::Classification;
use crate::pipeline::value::titer_value;

use super::types::{InsightSeverity, TrendInsight};

/// Titer dilution below which a falling result is clinically notable.
const TITER_IMPROVING_BAND: f64 = 80.0;

/// Titer dilution at or above which a rising result is notable.
const TITER_WARNING_BAND: f64 = 160.0;

fn insight(severity: InsightSeverity, message: impl Into<String>) -> Option<TrendInsight> {
    Some(TrendInsight {
        severity,
        message: message.into(),
    })
}

/// Pick the single highest-priority insight for a biomarker, if any.
pub fn trend_insight(
    events: &[TimelineEvent],
    classification: &Classification,
) -> Option<TrendInsight> {
    // 1. Titer crossing a clinically notable band.
    if classification.value_type == ValueType::Titer {
        if let Some(i) = titer_band_crossing(events) {
            return Some(i);
        }
    }

    // 2/3. Range transition between the last two events.
    if events.len() >= 2 {
        let previous = &events[events.len() - 2];
        let latest = &events[events.len() - 1];
        if previous.status == EventStatus::OutOfRange && latest.status == EventStatus::InRange {
            return insight(InsightSeverity::Improving, "Moved back into range");
        }
        if previous.status == EventStatus::InRange && latest.status == EventStatus::OutOfRange {
            return insight(InsightSeverity::Warning, "Moved out of range");
        }
    }

    // 4. A run of recent in-range results.
    let recent = &events[events.len().saturating_sub(3)..];
    if events.len() >= 3 && recent.iter().all(|e| e.status == EventStatus::InRange) {
        return insight(InsightSeverity::Stable, "In range across recent results");
    }

    // 5. A run of recent out-of-range results.
    if events.len() >= 2 && recent.iter().all(|e| e.status == EventStatus::OutOfRange) {
        return insight(
            InsightSeverity::Attention,
            "Out of range across recent results",
        );
    }

    // 6. Pass/fail tests that have passed every time.
    if classification.biomarker_type == BiomarkerType::CategoricalBinary
        && !events.is_empty()
        && events.iter().all(|e| e.is_in_range)
    {
        return insight(InsightSeverity::Stable, "All results normal");
    }

    None
}

/// Crossing detection over the last two titer readings: falling out of
/// the ≥1:80 band is improving, rising into the ≥1:160 band warns.
fn titer_band_crossing(events: &[TimelineEvent]) -> Option<TrendInsight> {
    let series: Vec<f64> = events.iter().filter_map(|e| titer_value(&e.value)).collect();
    let [.., previous, latest] = series.as_slice() else {
        return None;
    };
    if *previous >= TITER_IMPROVING_BAND && latest < previous {
        return insight(
            InsightSeverity::Improving,
            format!("Titer fell from 1:{previous:.0} to 1:{latest:.0}"),
        );
    }
    if *latest >= TITER_WARNING_BAND && latest > previous {
        return insight(
            InsightSeverity::Warning,
            format!("Titer rose from 1:{previous:.0} to 1:{latest:.0}"),
        );
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DisplayHint;

    fn event(date: &str, value: &str, status: EventStatus) -> TimelineEvent {
        TimelineEvent {
            date: date.into(),
            value: value.into(),
            unit: String::new(),
            status,
            is_in_range: status == EventStatus::InRange,
        }
    }

    fn classification(biomarker_type: BiomarkerType, value_type: ValueType) -> Classification {
        Classification {
            biomarker_type,
            reference_data: None,
            display_hint: DisplayHint::Simple,
            value_type,
            event_count: 0,
        }
    }

    #[test]
    fn falling_titer_across_band_is_improving() {
        let events = [
            event("2024-01-01", "1:160", EventStatus::OutOfRange),
            event("2024-06-01", "1:40", EventStatus::OutOfRange),
        ];
        let cls = classification(BiomarkerType::Titer, ValueType::Titer);
        let i = trend_insight(&events, &cls).unwrap();
        assert_eq!(i.severity, InsightSeverity::Improving);
        assert!(i.message.contains("1:160"));
    }

    #[test]
    fn rising_titer_into_band_warns() {
        let events = [
            event("2024-01-01", "1:80", EventStatus::OutOfRange),
            event("2024-06-01", "1:320", EventStatus::OutOfRange),
        ];
        let cls = classification(BiomarkerType::Titer, ValueType::Titer);
        let i = trend_insight(&events, &cls).unwrap();
        assert_eq!(i.severity, InsightSeverity::Warning);
    }

    #[test]
    fn low_titer_movement_falls_through_to_status_rules() {
        // 1:20 → 1:40 crosses no notable band; both out of range, so
        // the recent-run rule reports attention instead.
        let events = [
            event("2023-06-01", "1:20", EventStatus::OutOfRange),
            event("2024-06-01", "1:40", EventStatus::OutOfRange),
        ];
        let cls = classification(BiomarkerType::Titer, ValueType::Titer);
        let i = trend_insight(&events, &cls).unwrap();
        assert_eq!(i.severity, InsightSeverity::Attention);
    }

    #[test]
    fn out_to_in_transition_is_improving() {
        let events = [
            event("2024-01-01", "101", EventStatus::OutOfRange),
            event("2024-06-01", "92", EventStatus::InRange),
        ];
        let cls = classification(BiomarkerType::NumericBand, ValueType::Numeric);
        let i = trend_insight(&events, &cls).unwrap();
        assert_eq!(i.severity, InsightSeverity::Improving);
    }

    #[test]
    fn in_to_out_transition_warns() {
        let events = [
            event("2024-01-01", "92", EventStatus::InRange),
            event("2024-06-01", "120", EventStatus::OutOfRange),
        ];
        let cls = classification(BiomarkerType::NumericBand, ValueType::Numeric);
        let i = trend_insight(&events, &cls).unwrap();
        assert_eq!(i.severity, InsightSeverity::Warning);
    }

    #[test]
    fn three_recent_in_range_is_stable() {
        let events = [
            event("2023-01-01", "90", EventStatus::InRange),
            event("2024-01-01", "91", EventStatus::InRange),
            event("2024-06-01", "92", EventStatus::InRange),
        ];
        let cls = classification(BiomarkerType::NumericBand, ValueType::Numeric);
        let i = trend_insight(&events, &cls).unwrap();
        assert_eq!(i.severity, InsightSeverity::Stable);
    }

    #[test]
    fn two_in_range_events_is_not_yet_stable() {
        let events = [
            event("2024-01-01", "91", EventStatus::InRange),
            event("2024-06-01", "92", EventStatus::InRange),
        ];
        let cls = classification(BiomarkerType::NumericBand, ValueType::Numeric);
        assert_eq!(trend_insight(&events, &cls), None);
    }

    #[test]
    fn persistent_out_of_range_is_attention() {
        let events = [
            event("2024-01-01", "130", EventStatus::OutOfRange),
            event("2024-06-01", "135", EventStatus::OutOfRange),
        ];
        let cls = classification(BiomarkerType::NumericBand, ValueType::Numeric);
        let i = trend_insight(&events, &cls).unwrap();
        assert_eq!(i.severity, InsightSeverity::Attention);
    }

    #[test]
    fn all_pass_binary_history_is_stable() {
        let events = [
            event("2023-01-01", "NEGATIVE", EventStatus::InRange),
            event("2024-06-01", "NEGATIVE", EventStatus::InRange),
        ];
        let cls = classification(BiomarkerType::CategoricalBinary, ValueType::Categorical);
        let i = trend_insight(&events, &cls).unwrap();
        assert_eq!(i.severity, InsightSeverity::Stable);
        assert_eq!(i.message, "All results normal");
    }

    #[test]
    fn no_insight_for_single_unremarkable_event() {
        let events = [event("2024-01-01", "92", EventStatus::InRange)];
        let cls = classification(BiomarkerType::NumericBand, ValueType::Numeric);
        assert_eq!(trend_insight(&events, &cls), None);
    }
}
