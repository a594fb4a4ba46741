use thiserror::Error;

/// Errors at the dataset boundary (decoding extraction snapshots,
/// resolving collaborator-facing strings). The normalization pipeline
/// itself never errors: malformed input degrades to fallback variants.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to decode extraction snapshot: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid {field} value: '{value}'")]
    InvalidEnum { field: String, value: String },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}
