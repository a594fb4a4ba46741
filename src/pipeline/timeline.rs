//! Timeline building: merge a biomarker's current reading and its
//! historical entries into one chronologically ordered, deduplicated
//! event sequence, the canonical view every downstream component
//! consumes.

use std::collections::HashSet;

use crate::models::{
    ConsolidatedBiomarker, EventStatus, HistoricalEntry, RawBiomarkerRecord, TimelineEvent,
};

use super::dates::normalize_date;

/// A single historical observation as seen by the timeline builder,
/// detached from whichever record shape it came from.
#[derive(Debug, Clone, Default)]
pub struct HistoryPoint {
    pub date: Option<String>,
    pub value: Option<String>,
    pub unit: Option<String>,
    pub status: Option<String>,
    pub in_range: Option<bool>,
}

/// Anything a timeline can be built from: a raw scraped record or an
/// already-consolidated biomarker.
pub trait TimelineSource {
    fn current_date(&self) -> Option<&str>;
    fn current_value(&self) -> Option<&str>;
    fn current_unit(&self) -> Option<&str>;
    fn current_status(&self) -> Option<&str>;
    fn history(&self) -> Vec<HistoryPoint>;
}

impl TimelineSource for RawBiomarkerRecord {
    fn current_date(&self) -> Option<&str> {
        self.date.as_deref()
    }
    fn current_value(&self) -> Option<&str> {
        self.value.as_deref()
    }
    fn current_unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }
    fn current_status(&self) -> Option<&str> {
        self.status.as_deref()
    }
    fn history(&self) -> Vec<HistoryPoint> {
        self.historical_values.iter().map(HistoryPoint::from).collect()
    }
}

impl From<&HistoricalEntry> for HistoryPoint {
    fn from(entry: &HistoricalEntry) -> Self {
        HistoryPoint {
            date: entry.date.clone(),
            value: entry.value.clone(),
            unit: entry.unit.clone(),
            status: entry.status.clone(),
            in_range: entry.in_range,
        }
    }
}

impl TimelineSource for ConsolidatedBiomarker {
    fn current_date(&self) -> Option<&str> {
        self.date.as_deref()
    }
    fn current_value(&self) -> Option<&str> {
        self.value.as_deref()
    }
    fn current_unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }
    fn current_status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
    fn history(&self) -> Vec<HistoryPoint> {
        self.historical_values
            .iter()
            .map(|e| HistoryPoint {
                date: Some(e.date.clone()),
                value: Some(e.value.clone()),
                unit: Some(e.unit.clone()),
                status: Some(e.status.as_str().to_string()),
                in_range: Some(e.is_in_range),
            })
            .collect()
    }
}

/// The fallback-to-parent policy, as one explicit function: an entry's
/// own field wins, the parent record's current field fills the gap,
/// and an empty string marks a genuinely absent value.
pub(crate) fn inherit(own: Option<&str>, parent: Option<&str>) -> String {
    own.or(parent).unwrap_or_default().to_string()
}

/// Status resolution for one history point. A point that says anything
/// about its own status (label or boolean) is taken at its word; only
/// a fully silent point inherits the parent's status label.
fn point_status(point: &HistoryPoint, parent: Option<&str>) -> EventStatus {
    if point.status.is_some() || point.in_range.is_some() {
        return EventStatus::from_label(point.status.as_deref(), point.in_range);
    }
    EventStatus::from_label(parent, None)
}

/// Build the ordered, deduplicated event sequence for one biomarker.
///
/// Historical entries without a usable date are dropped. The source's
/// own current reading is appended unless an emitted event already
/// covers its normalized date. No two surviving events share a
/// `(date, value)` pair; the first occurrence wins.
pub fn build_timeline_events<S: TimelineSource>(source: &S) -> Vec<TimelineEvent> {
    let mut events: Vec<TimelineEvent> = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for point in source.history() {
        let Some(date) = normalize_date(point.date.as_deref()) else {
            continue;
        };
        let value = inherit(point.value.as_deref(), source.current_value());
        if !seen.insert((date.clone(), value.clone())) {
            continue;
        }
        let status = point_status(&point, source.current_status());
        events.push(TimelineEvent {
            unit: inherit(point.unit.as_deref(), source.current_unit()),
            is_in_range: status == EventStatus::InRange,
            date,
            value,
            status,
        });
    }

    if let Some(date) = normalize_date(source.current_date()) {
        if !events.iter().any(|e| e.date == date) {
            let status = EventStatus::from_label(source.current_status(), None);
            events.push(TimelineEvent {
                value: source.current_value().unwrap_or_default().to_string(),
                unit: source.current_unit().unwrap_or_default().to_string(),
                is_in_range: status == EventStatus::InRange,
                date,
                status,
            });
        }
    }

    events.sort_by(|a, b| a.date.cmp(&b.date));
    events
}
