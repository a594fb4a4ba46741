//! Normalized biomarker entities produced by the pipeline: dated
//! timeline events and the consolidated per-test record the rendering
//! and export collaborators consume.

use serde::{Deserialize, Serialize};

use super::enums::EventStatus;

/// One dated observation of a biomarker.
///
/// Invariants (upheld by the timeline builder and consolidator):
/// ordered ascending by calendar date within a timeline, no two events
/// share the same `(date, value)` pair, and every event derives from a
/// single biomarker's own records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    /// Normalized `YYYY-MM-DD` date key (or the raw string when the
    /// source format was unrecognized).
    pub date: String,
    pub value: String,
    pub unit: String,
    pub status: EventStatus,
    pub is_in_range: bool,
}

/// One canonical biomarker entry, merged from every record and layout
/// variant that resolved to the same normalized name key. Built once
/// per extraction batch and never mutated; re-extraction produces a
/// fresh batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedBiomarker {
    /// Best display name among the merged spellings.
    pub name: String,
    pub unit: Option<String>,
    pub reference_range: Option<String>,
    /// Deduplicated, date-sorted history.
    pub historical_values: Vec<TimelineEvent>,
    /// Date of the latest event, if any.
    pub date: Option<String>,
    /// Value of the latest event, if any.
    pub value: Option<String>,
    /// Status of the latest event; Unknown for an empty history.
    pub status: EventStatus,
}

impl ConsolidatedBiomarker {
    /// Latest event, when the history is non-empty.
    pub fn latest(&self) -> Option<&TimelineEvent> {
        self.historical_values.last()
    }

    /// Events restricted to a `[from, to]` date-key window (inclusive,
    /// lexical, valid for normalized `YYYY-MM-DD` keys). `None` bounds
    /// are open.
    pub fn events_between(&self, from: Option<&str>, to: Option<&str>) -> Vec<TimelineEvent> {
        self.historical_values
            .iter()
            .filter(|e| from.map_or(true, |f| e.date.as_str() >= f))
            .filter(|e| to.map_or(true, |t| e.date.as_str() <= t))
            .cloned()
            .collect()
    }
}
