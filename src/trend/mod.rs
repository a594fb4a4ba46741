//! Status/trend engine: current status, directional movement, the
//! single prioritized insight, and the progress narrative. Consumes
//! the classifier's output and the canonical event sequence; the
//! rendering collaborator consumes these results verbatim and never
//! re-derives them.

mod direction;
mod insight;
mod narrative;
mod status;
mod types;

pub use direction::*;
pub use insight::*;
pub use narrative::*;
pub use status::*;
pub use types::*;

use crate::models::ConsolidatedBiomarker;
use crate::pipeline::classify::Classification;

/// Assemble the full per-biomarker trend summary in one pass.
pub fn summarize(biomarker: &ConsolidatedBiomarker, classification: &Classification) -> TrendSummary {
    let events = &biomarker.historical_values;
    TrendSummary {
        status: determine_biomarker_status(events),
        direction: trend_direction(events, classification),
        insight: trend_insight(events, classification),
        narrative: progress_narrative(events, classification),
    }
}
