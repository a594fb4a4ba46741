//! Current-status determination over an event sequence.

use crate::models::{BiomarkerStatus, EventStatus, TimelineEvent};

/// Status of a biomarker given its ordered event sequence.
///
/// The latest event's status carries, except for the one transient
/// view: an Out of Range reading immediately followed by an In Range
/// reading reports as Improving. Deliberately a two-event lookback:
/// Out→In→Out reports Out of Range with no memory of the middle leg.
pub fn determine_biomarker_status(events: &[TimelineEvent]) -> BiomarkerStatus {
    let Some(latest) = events.last() else {
        return BiomarkerStatus::Unknown;
    };

    if events.len() >= 2 {
        let previous = &events[events.len() - 2];
        if previous.status == EventStatus::OutOfRange && latest.status == EventStatus::InRange {
            return BiomarkerStatus::Improving;
        }
    }

    latest.status.into()
}
