//! Progress narrative: one human-readable sentence summarizing a
//! biomarker's history for the detail view.

use chrono::NaiveDate;

use crate::models::{EventStatus, TimelineEvent, ValueType};
use crate::pipeline::classify::Classification;
use crate::pipeline::reference::{ReferenceData, ThresholdDirection};
use crate::pipeline::value::extract_numeric;

/// Phrase one biomarker's history. Checks run in priority order:
/// first-test, range transition, full-history consistency, numeric or
/// titer percent change, then a neutral tracking statement.
pub fn progress_narrative(events: &[TimelineEvent], classification: &Classification) -> String {
    let Some(latest) = events.last() else {
        return "No dated results yet.".to_string();
    };

    if events.len() == 1 {
        return format!("First time tested on {}.", latest.date);
    }

    let previous = &events[events.len() - 2];
    if previous.status == EventStatus::OutOfRange && latest.status == EventStatus::InRange {
        return format!("Moved into range on {}.", latest.date);
    }
    if previous.status == EventStatus::InRange && latest.status == EventStatus::OutOfRange {
        return format!("Moved out of range on {}.", latest.date);
    }

    if events.iter().all(|e| e.status == EventStatus::InRange) {
        return format!("In range across all {} results.", events.len());
    }
    if events.iter().all(|e| e.status == EventStatus::OutOfRange) {
        return format!("Out of range across all {} results.", events.len());
    }

    if matches!(
        classification.value_type,
        ValueType::Numeric | ValueType::Titer
    ) {
        if let Some(phrase) = change_phrase(events, classification) {
            return phrase;
        }
    }

    format!(
        "Tracking {} results over {}.",
        events.len(),
        span_phrase(&events[0].date, &latest.date)
    )
}

/// Percent-change phrasing between the earliest and latest parseable
/// readings. "Improved" only when the movement is favorable for the
/// reference type; otherwise the neutral "Changed".
fn change_phrase(events: &[TimelineEvent], classification: &Classification) -> Option<String> {
    let series: Vec<(&str, f64)> = events
        .iter()
        .filter_map(|e| extract_numeric(Some(&e.value)).map(|v| (e.date.as_str(), v)))
        .collect();
    let (first_date, first) = *series.first()?;
    let (last_date, last) = *series.last()?;
    if series.len() < 2 || first == 0.0 {
        return None;
    }

    let percent = (last - first) / first.abs() * 100.0;
    let verb = if change_is_improvement(classification.reference_data.as_ref(), first, last) {
        "Improved"
    } else {
        "Changed"
    };
    Some(format!(
        "{verb} {:.0}% over {}.",
        percent.abs(),
        span_phrase(first_date, last_date)
    ))
}

/// Which way is "better" depends on the reference shape: down for an
/// upper threshold, up for a lower threshold, toward the midpoint for
/// a band, down for a titer bound.
fn change_is_improvement(reference: Option<&ReferenceData>, first: f64, last: f64) -> bool {
    match reference {
        Some(ReferenceData::Threshold {
            direction: ThresholdDirection::Upper,
            ..
        }) => last < first,
        Some(ReferenceData::Threshold {
            direction: ThresholdDirection::Lower,
            ..
        }) => last > first,
        Some(ReferenceData::Band { lower, upper }) => {
            let midpoint = (lower + upper) / 2.0;
            (last - midpoint).abs() < (first - midpoint).abs()
        }
        Some(ReferenceData::Titer { .. }) => last < first,
        _ => false,
    }
}

/// Bucket a date span into days, months, or years.
fn span_phrase(first_date: &str, last_date: &str) -> String {
    let parse = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
    let (Some(first), Some(last)) = (parse(first_date), parse(last_date)) else {
        return "time".to_string();
    };
    let days = (last - first).num_days().max(1);
    if days < 60 {
        format!("{days} days")
    } else if days < 730 {
        format!("{} months", days / 30)
    } else {
        format!("{} years", days / 365)
    }
}
