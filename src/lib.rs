//! biotrend: normalization, consolidation and trend engine for
//! personal lab-biomarker records scraped from a patient portal.
//!
//! The extraction collaborator (DOM scraping / REST capture) hands
//! over raw, inconsistently formatted records; this crate turns them
//! into typed, consolidated biomarkers with classifications and trend
//! summaries. The rendering/export collaborators consume those typed
//! outputs and never re-derive classification or status themselves.

pub mod diagnostics;
pub mod error;
pub mod export;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod trend;

pub use error::DatasetError;
