//! Dataset metrics: recompute the portal's summary counters from raw
//! records, honoring the active category/date filter.

use serde::{Deserialize, Serialize};

use crate::models::{BiomarkerStatus, DatasetFilter, ExtractionSnapshot};
use crate::pipeline::consolidate::consolidate_biomarkers_by_name;
use crate::trend::determine_biomarker_status;

/// Tallies over the filtered dataset. Buckets are mutually exclusive;
/// a biomarker with no events inside the filter window is "no data for
/// the current filter" and is not tallied at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMetrics {
    pub in_range: u32,
    pub out_of_range: u32,
    pub improving: u32,
    pub unknown: u32,
    pub total: u32,
    /// `round(in_range / total * 100)`; 0 for an empty tally.
    pub health_score: u32,
}

/// Re-run consolidation and status determination over the snapshot,
/// restricted to the filter, and tally the outcome.
pub fn compute_dataset_metrics(
    snapshot: &ExtractionSnapshot,
    filter: &DatasetFilter,
) -> DatasetMetrics {
    let mut in_range = 0u32;
    let mut out_of_range = 0u32;
    let mut improving = 0u32;
    let mut unknown = 0u32;

    for (category, records) in &snapshot.categories {
        if !filter.matches_category(category) {
            continue;
        }
        for biomarker in consolidate_biomarkers_by_name(&records.biomarkers) {
            let events = biomarker
                .events_between(filter.date_from.as_deref(), filter.date_to.as_deref());
            if events.is_empty() {
                continue;
            }
            match determine_biomarker_status(&events) {
                BiomarkerStatus::InRange => in_range += 1,
                BiomarkerStatus::OutOfRange => out_of_range += 1,
                BiomarkerStatus::Improving => improving += 1,
                BiomarkerStatus::Unknown => unknown += 1,
            }
        }
    }

    let total = in_range + out_of_range + improving + unknown;
    let health_score = if total > 0 {
        (f64::from(in_range) / f64::from(total) * 100.0).round() as u32
    } else {
        0
    };

    DatasetMetrics {
        in_range,
        out_of_range,
        improving,
        unknown,
        total,
        health_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryRecords, HistoricalEntry, RawBiomarkerRecord};
    use std::collections::BTreeMap;

    fn rec(name: &str, date: &str, value: &str, status: &str) -> RawBiomarkerRecord {
        RawBiomarkerRecord {
            name: name.into(),
            value: Some(value.into()),
            unit: Some("mg/dL".into()),
            status: Some(status.into()),
            reference_range: None,
            date: Some(date.into()),
            historical_values: vec![],
        }
    }

    fn snapshot(categories: Vec<(&str, Vec<RawBiomarkerRecord>)>) -> ExtractionSnapshot {
        ExtractionSnapshot {
            categories: categories
                .into_iter()
                .map(|(name, biomarkers)| (name.to_string(), CategoryRecords { biomarkers }))
                .collect::<BTreeMap<_, _>>(),
            summary: None,
        }
    }

    #[test]
    fn tallies_across_categories() {
        let snap = snapshot(vec![
            (
                "Heart",
                vec![
                    rec("LDL", "2024-06-01", "92", "In Range"),
                    rec("Triglycerides", "2024-06-01", "180", "Out of Range"),
                ],
            ),
            ("Kidneys", vec![rec("Creatinine", "2024-06-01", "1.0", "In Range")]),
        ]);
        let metrics = compute_dataset_metrics(&snap, &DatasetFilter::default());
        assert_eq!(metrics.in_range, 2);
        assert_eq!(metrics.out_of_range, 1);
        assert_eq!(metrics.total, 3);
        assert_eq!(metrics.health_score, 67);
    }

    #[test]
    fn category_filter_restricts_tally() {
        let snap = snapshot(vec![
            ("Heart", vec![rec("LDL", "2024-06-01", "92", "In Range")]),
            ("Kidneys", vec![rec("Creatinine", "2024-06-01", "2.1", "Out of Range")]),
        ]);
        let filter = DatasetFilter {
            category: Some("Heart".into()),
            ..Default::default()
        };
        let metrics = compute_dataset_metrics(&snap, &filter);
        assert_eq!(metrics.total, 1);
        assert_eq!(metrics.health_score, 100);
    }

    #[test]
    fn date_window_excludes_biomarkers_without_data() {
        let snap = snapshot(vec![(
            "Heart",
            vec![
                rec("LDL", "2023-06-01", "92", "In Range"),
                rec("ApoB", "2024-06-01", "85", "In Range"),
            ],
        )]);
        let filter = DatasetFilter {
            date_from: Some("2024-01-01".into()),
            ..Default::default()
        };
        let metrics = compute_dataset_metrics(&snap, &filter);
        assert_eq!(metrics.total, 1);
    }

    #[test]
    fn improving_is_tallied_separately() {
        let mut biomarker = rec("Glucose", "2024-06-01", "92", "In Range");
        biomarker.historical_values.push(HistoricalEntry {
            date: Some("2024-01-01".into()),
            value: Some("110".into()),
            unit: None,
            status: Some("Out of Range".into()),
            in_range: None,
        });
        let snap = snapshot(vec![("Metabolic", vec![biomarker])]);
        let metrics = compute_dataset_metrics(&snap, &DatasetFilter::default());
        assert_eq!(metrics.improving, 1);
        assert_eq!(metrics.in_range, 0);
        assert_eq!(metrics.total, 1);
        // Improving is not "in range" for the score.
        assert_eq!(metrics.health_score, 0);
    }

    #[test]
    fn empty_dataset_scores_zero_without_error() {
        let metrics = compute_dataset_metrics(&snapshot(vec![]), &DatasetFilter::default());
        assert_eq!(metrics.total, 0);
        assert_eq!(metrics.health_score, 0);
    }
}
