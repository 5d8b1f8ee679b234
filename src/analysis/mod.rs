//! Request-level analysis: classify the text, then attach fact-check sources.

mod service;
mod types;

pub use service::{AnalysisApi, AnalysisService};
pub use types::{AnalysisError, AnalysisOutcome, ConfidenceBand};
