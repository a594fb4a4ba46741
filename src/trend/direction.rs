//! Directional movement between the last two comparable readings,
//! specialized per value type.

use crate::models::{TimelineEvent, ValueType};
use crate::pipeline::classify::Classification;
use crate::pipeline::value::{extract_numeric, titer_value};

use super::types::TrendDirection;

/// Numeric changes below this magnitude count as flat.
pub const STABLE_PERCENT: f64 = 5.0;

/// Fold change worth reporting on a rising titer.
const NOTABLE_FOLD: f64 = 2.0;

/// Direction of movement for one biomarker's event sequence.
pub fn trend_direction(events: &[TimelineEvent], classification: &Classification) -> TrendDirection {
    match classification.value_type {
        ValueType::Numeric => numeric_direction(events),
        ValueType::Titer => titer_direction(events),
        ValueType::Categorical => categorical_direction(events),
        ValueType::Pattern => pattern_direction(events),
        ValueType::Unknown => TrendDirection::Indeterminate,
    }
}

/// Signed percent change between the last two numeric-parseable events.
fn numeric_direction(events: &[TimelineEvent]) -> TrendDirection {
    let series: Vec<f64> = events
        .iter()
        .filter_map(|e| extract_numeric(Some(&e.value)))
        .collect();
    let [.., previous, latest] = series.as_slice() else {
        return TrendDirection::Indeterminate;
    };
    if *previous == 0.0 {
        return TrendDirection::Indeterminate;
    }
    let percent = (latest - previous) / previous.abs() * 100.0;
    if percent.abs() < STABLE_PERCENT {
        TrendDirection::Flat
    } else if percent > 0.0 {
        TrendDirection::Rising { percent }
    } else {
        TrendDirection::Falling { percent }
    }
}

/// Titer movement compares dilution denominators; any increase is
/// warning-flagged, a decrease is favorable.
fn titer_direction(events: &[TimelineEvent]) -> TrendDirection {
    let series: Vec<f64> = events
        .iter()
        .filter_map(|e| titer_value(&e.value))
        .collect();
    let [.., previous, latest] = series.as_slice() else {
        return TrendDirection::Indeterminate;
    };
    if latest == previous {
        TrendDirection::TiterStable
    } else if latest > previous {
        let fold = latest / previous;
        TrendDirection::TiterRising {
            fold_change: (fold >= NOTABLE_FOLD).then_some(fold),
        }
    } else {
        TrendDirection::TiterFalling
    }
}

/// Categorical results are consistent when every reading matches the
/// latest one (case-insensitive).
fn categorical_direction(events: &[TimelineEvent]) -> TrendDirection {
    let Some(latest) = events.last() else {
        return TrendDirection::Indeterminate;
    };
    let reference = latest.value.to_uppercase();
    if events.iter().all(|e| e.value.to_uppercase() == reference) {
        TrendDirection::Consistent
    } else {
        TrendDirection::Varied
    }
}

/// Pattern results flag a change between the last two readings.
fn pattern_direction(events: &[TimelineEvent]) -> TrendDirection {
    let [.., previous, latest] = events else {
        return TrendDirection::Indeterminate;
    };
    if latest.value.eq_ignore_ascii_case(&previous.value) {
        TrendDirection::PatternStable
    } else {
        TrendDirection::PatternChanged
    }
}
