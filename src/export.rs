//! Export row assembly. The CSV/table/JSON formatting itself lives in
//! the export collaborator; the core owns the row contents and the
//! ordering contract: category, then biomarker name, then date, all
//! lexical, with empty dates sorting first via a sentinel.

use serde::{Deserialize, Serialize};

use crate::models::{DatasetFilter, ExtractionSnapshot};
use crate::pipeline::consolidate::consolidate_biomarkers_by_name;

/// Sentinel date key that sorts before any real `YYYY-MM-DD` key.
pub const EARLIEST_DATE_SENTINEL: &str = "0000-00-00";

/// One exportable observation. Field names mirror the data model for
/// interoperability with the collaborator formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub category: String,
    pub name: String,
    /// Empty when the biomarker never had a dated result.
    pub date: String,
    pub value: String,
    pub unit: String,
    pub status: String,
    pub reference_range: String,
}

impl ExportRow {
    fn sort_key(&self) -> (&str, &str, &str) {
        let date = if self.date.is_empty() {
            EARLIEST_DATE_SENTINEL
        } else {
            &self.date
        };
        (&self.category, &self.name, date)
    }
}

/// Flatten a snapshot into ordered export rows, one per event. A
/// biomarker with no dated events still contributes a single undated
/// row so the test itself is not silently dropped from the output.
pub fn export_rows(snapshot: &ExtractionSnapshot, filter: &DatasetFilter) -> Vec<ExportRow> {
    let mut rows: Vec<ExportRow> = Vec::new();

    for (category, records) in &snapshot.categories {
        if !filter.matches_category(category) {
            continue;
        }
        for biomarker in consolidate_biomarkers_by_name(&records.biomarkers) {
            let events = biomarker
                .events_between(filter.date_from.as_deref(), filter.date_to.as_deref());
            let reference_range = biomarker.reference_range.clone().unwrap_or_default();

            if events.is_empty() && filter.date_from.is_none() && filter.date_to.is_none() {
                rows.push(ExportRow {
                    category: category.clone(),
                    name: biomarker.name.clone(),
                    date: String::new(),
                    value: biomarker.value.clone().unwrap_or_default(),
                    unit: biomarker.unit.clone().unwrap_or_default(),
                    status: biomarker.status.as_str().to_string(),
                    reference_range,
                });
                continue;
            }

            for event in events {
                rows.push(ExportRow {
                    category: category.clone(),
                    name: biomarker.name.clone(),
                    date: event.date,
                    value: event.value,
                    unit: event.unit,
                    status: event.status.as_str().to_string(),
                    reference_range: reference_range.clone(),
                });
            }
        }
    }

    rows.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    rows
}
