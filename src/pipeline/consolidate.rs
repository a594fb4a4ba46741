//! Biomarker consolidation: merge records captured under name variants
//! and different page layouts into one canonical entry per test, with
//! a unified, deduplicated history.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ConsolidatedBiomarker, EventStatus, RawBiomarkerRecord, TimelineEvent};

use super::dates::normalize_date;
use super::timeline::inherit;

/// Vendor suffix one layout appends to omega panels: "Omega-3 / OmegaCheck".
static RE_OMEGACHECK_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*/\s*omega\s*check\s*$").unwrap());

/// "Omega 3" vs "Omega-3" across layouts.
static RE_OMEGA_SPACED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bomega\s+(\d)").unwrap());

static RE_COLON_SPACING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*:\s*").unwrap());

static RE_MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalized grouping key for a biomarker name. Two spellings with the
/// same key describe the same underlying test.
pub fn normalize_name_key(name: &str) -> String {
    let trimmed = name.trim();
    let stripped = RE_OMEGACHECK_SUFFIX.replace(trimmed, "");
    let hyphenated = RE_OMEGA_SPACED.replace_all(&stripped, "Omega-$1");
    let colons = RE_COLON_SPACING.replace_all(&hyphenated, ":");
    let collapsed = RE_MULTI_SPACE.replace_all(&colons, " ");
    collapsed.trim().to_lowercase()
}

/// Whether a spelling carries the vendor suffix (disfavored for display).
fn has_vendor_suffix(name: &str) -> bool {
    RE_OMEGACHECK_SUFFIX.is_match(name.trim())
}

/// Pick the display name for a merged group: prefer a spelling without
/// the vendor suffix, then the shorter spelling, then alphabetical.
fn pick_display_name(names: &[&str]) -> String {
    names
        .iter()
        .map(|n| n.trim())
        .min_by_key(|n| (has_vendor_suffix(n), n.len(), n.to_string()))
        .unwrap_or_default()
        .to_string()
}

/// Merge a batch of raw records into one consolidated entry per
/// normalized name key. Group order follows first appearance in the
/// input, so repeated runs over the same batch are structurally
/// identical.
pub fn consolidate_biomarkers_by_name(
    records: &[RawBiomarkerRecord],
) -> Vec<ConsolidatedBiomarker> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<&RawBiomarkerRecord>> = HashMap::new();

    for record in records {
        let key = normalize_name_key(&record.name);
        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key.clone());
                Vec::new()
            })
            .push(record);
    }

    order
        .iter()
        .map(|key| consolidate_group(&groups[key]))
        .collect()
}

/// Build one consolidated biomarker from the records sharing a key.
fn consolidate_group(group: &[&RawBiomarkerRecord]) -> ConsolidatedBiomarker {
    let mut events: Vec<TimelineEvent> = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for record in group {
        // The record's own current reading counts as one result.
        if let Some(date) = normalize_date(record.date.as_deref()) {
            let value = record.value.clone().unwrap_or_default();
            if seen.insert((date.clone(), value.clone())) {
                let status = EventStatus::from_label(record.status.as_deref(), None);
                events.push(TimelineEvent {
                    unit: record.unit.clone().unwrap_or_default(),
                    is_in_range: status == EventStatus::InRange,
                    date,
                    value,
                    status,
                });
            }
        }

        for entry in &record.historical_values {
            let Some(date) = normalize_date(entry.date.as_deref()) else {
                continue;
            };
            let value = inherit(entry.value.as_deref(), record.value.as_deref());
            if !seen.insert((date.clone(), value.clone())) {
                continue;
            }
            let status = if entry.status.is_some() || entry.in_range.is_some() {
                EventStatus::from_label(entry.status.as_deref(), entry.in_range)
            } else {
                EventStatus::from_label(record.status.as_deref(), None)
            };
            events.push(TimelineEvent {
                unit: inherit(entry.unit.as_deref(), record.unit.as_deref()),
                is_in_range: status == EventStatus::InRange,
                date,
                value,
                status,
            });
        }
    }

    // Lexical sort is a calendar sort once dates are normalized keys.
    events.sort_by(|a, b| a.date.cmp(&b.date));

    let names: Vec<&str> = group.iter().map(|r| r.name.as_str()).collect();
    let latest = events.last().cloned();

    ConsolidatedBiomarker {
        name: pick_display_name(&names),
        unit: group.iter().find_map(|r| r.unit.clone()),
        reference_range: group.iter().find_map(|r| r.reference_range.clone()),
        date: latest.as_ref().map(|e| e.date.clone()),
        value: latest.as_ref().map(|e| e.value.clone()),
        status: latest
            .as_ref()
            .map(|e| e.status)
            .unwrap_or(EventStatus::Unknown),
        historical_values: events,
    }
}
