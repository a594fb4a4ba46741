//! Normalization pipeline: raw scraped records → consolidated,
//! classified biomarkers.
//!
//! Stages in dependency order: date and value normalization, reference
//! range parsing, timeline building, cross-record consolidation, and
//! classification. Every stage is a pure function over in-memory
//! records; malformed input degrades to fallback values, never errors.

pub mod classify;
pub mod consolidate;
pub mod dates;
pub mod keywords;
pub mod reference;
pub mod timeline;
pub mod value;
