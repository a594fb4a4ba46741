//! Data model: raw extraction-side records, normalized timeline
//! entities, collaborator-facing enums, and view filters.

mod biomarker;
mod enums;
mod filters;
mod raw;

pub use biomarker::*;
pub use enums::*;
pub use filters::*;
pub use raw::*;
