use serde::{Deserialize, Serialize};

use crate::models::BiomarkerStatus;

/// Directional movement between the last two comparable readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TrendDirection {
    /// Numeric change below the stability threshold.
    Flat,
    Rising {
        percent: f64,
    },
    Falling {
        percent: f64,
    },
    TiterStable,
    /// Rising titer is always warning-flagged; the fold change is
    /// reported once the dilution at least doubles.
    TiterRising {
        fold_change: Option<f64>,
    },
    TiterFalling,
    /// Every categorical reading matches the latest one.
    Consistent,
    Varied,
    PatternChanged,
    PatternStable,
    /// Fewer than two comparable readings.
    Indeterminate,
}

/// Severity bucket of a trend insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSeverity {
    Improving,
    Warning,
    Stable,
    Attention,
}

/// At most one narrative-worthy observation about a biomarker's recent
/// movement, chosen by a prioritized rule list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendInsight {
    pub severity: InsightSeverity,
    pub message: String,
}

/// Everything the rendering collaborator needs about one biomarker's
/// movement, computed in a single pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub status: BiomarkerStatus,
    pub direction: TrendDirection,
    pub insight: Option<TrendInsight>,
    pub narrative: String,
}
