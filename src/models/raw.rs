//! Raw extraction-side records, exactly as captured from the portal by
//! the scraping collaborator. Field names mirror the JSON it emits
//! (camelCase); every field the page may omit is an explicit Option.
//! Records are immutable once captured; consolidation builds fresh
//! entities rather than mutating these.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

/// One biomarker as scraped from a single page/layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBiomarkerRecord {
    pub name: String,
    pub value: Option<String>,
    pub unit: Option<String>,
    pub status: Option<String>,
    pub reference_range: Option<String>,
    pub date: Option<String>,
    #[serde(default)]
    pub historical_values: Vec<HistoricalEntry>,
}

/// One prior observation attached to a scraped record. Layouts differ:
/// some carry a status string, some only an in-range boolean, some
/// omit value/unit and inherit them from the parent record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalEntry {
    pub date: Option<String>,
    pub value: Option<String>,
    pub unit: Option<String>,
    pub status: Option<String>,
    pub in_range: Option<bool>,
}

/// The envelope one extraction batch arrives in: biomarkers grouped by
/// portal category, plus the summary counters the page itself displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionSnapshot {
    pub categories: BTreeMap<String, CategoryRecords>,
    #[serde(default)]
    pub summary: Option<SnapshotSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecords {
    #[serde(default)]
    pub biomarkers: Vec<RawBiomarkerRecord>,
}

/// Counters as displayed by the source page. The core can recompute
/// them independently via `metrics::compute_dataset_metrics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSummary {
    pub in_range: u32,
    pub out_of_range: u32,
    pub improving: u32,
    pub total: u32,
}

impl ExtractionSnapshot {
    /// Decode a snapshot from the JSON the extraction collaborator
    /// hands over (content script message or REST capture).
    pub fn from_json(raw: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// All records in a single category, if the category exists.
    pub fn category(&self, name: &str) -> Result<&[RawBiomarkerRecord], DatasetError> {
        self.categories
            .get(name)
            .map(|c| c.biomarkers.as_slice())
            .ok_or_else(|| DatasetError::UnknownCategory(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_snapshot_with_partial_fields() {
        let json = r#"{
            "categories": {
                "Heart": {
                    "biomarkers": [{
                        "name": "LDL Cholesterol",
                        "value": "92",
                        "unit": "mg/dL",
                        "status": "In Range",
                        "referenceRange": "<100",
                        "date": "2025-06-14",
                        "historicalValues": [
                            { "date": "2024-11-02", "value": "131", "unit": null, "status": null, "inRange": false }
                        ]
                    }]
                }
            },
            "summary": { "inRange": 1, "outOfRange": 0, "improving": 0, "total": 1 }
        }"#;

        let snapshot = ExtractionSnapshot::from_json(json).unwrap();
        let records = snapshot.category("Heart").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "LDL Cholesterol");
        assert_eq!(records[0].historical_values[0].in_range, Some(false));
        assert_eq!(snapshot.summary.unwrap().total, 1);
    }

    #[test]
    fn decode_snapshot_without_summary_or_history() {
        let json = r#"{
            "categories": {
                "Hormones": {
                    "biomarkers": [{
                        "name": "TSH",
                        "value": null,
                        "unit": null,
                        "status": null,
                        "referenceRange": null,
                        "date": null
                    }]
                }
            }
        }"#;

        let snapshot = ExtractionSnapshot::from_json(json).unwrap();
        assert!(snapshot.summary.is_none());
        let records = snapshot.category("Hormones").unwrap();
        assert!(records[0].historical_values.is_empty());
    }

    #[test]
    fn unknown_category_is_an_error() {
        let snapshot = ExtractionSnapshot {
            categories: BTreeMap::new(),
            summary: None,
        };
        assert!(matches!(
            snapshot.category("Nope"),
            Err(DatasetError::UnknownCategory(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        assert!(matches!(
            ExtractionSnapshot::from_json("{not json"),
            Err(DatasetError::Decode(_))
        ));
    }
}
