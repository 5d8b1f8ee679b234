//! Result and error types for the analysis pipeline.

use crate::classifier::ClassifierError;
use crate::factcheck::{FactCheckError, Source};
use serde::Serialize;
use thiserror::Error;

/// Errors emitted by the analysis pipeline.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Classifier failed to label the text; the request cannot be answered.
    #[error("Classification failed: {0}")]
    Classifier(#[from] ClassifierError),
    /// Fact-check client could not be constructed at startup.
    #[error("Fact-check client unavailable: {0}")]
    FactCheck(#[from] FactCheckError),
}

/// Merged classifier and fact-check result for one piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    /// Category assigned by the classifier.
    pub label: String,
    /// Classifier score for `label`.
    pub confidence: f64,
    /// Fact-check sources; empty when the lookup failed or found nothing.
    pub sources: Vec<Source>,
}

/// Coarse bucket for presenting a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    /// 70% and above.
    High,
    /// 40% up to 70%.
    Medium,
    /// Below 40%.
    Low,
}

impl ConfidenceBand {
    /// Bucket a raw `0.0..=1.0` score. Scores are compared as percentages rounded to two
    /// decimals, matching what is displayed. Non-finite scores have no band.
    pub fn from_score(score: f64) -> Option<Self> {
        if !score.is_finite() {
            return None;
        }
        let percent = (score * 100.0 * 100.0).round() / 100.0;
        Some(if percent >= 70.0 {
            Self::High
        } else if percent >= 40.0 {
            Self::Medium
        } else {
            Self::Low
        })
    }
}

impl std::fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        f.write_str(label)
    }
}
