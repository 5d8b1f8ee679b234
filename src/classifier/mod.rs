//! Pretrained text-classifier clients.
//!
//! The model itself runs behind an inference server; this module only speaks its wire
//! format and reduces the returned label distribution to the single best prediction.

mod huggingface;
mod tei;

pub use huggingface::HuggingFaceClassifier;
pub use tei::TeiClassifier;

use crate::config::{ClassifierProvider, Config};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised by classifier backends.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// HTTP layer failed before a response was received.
    #[error("Classifier request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Backend answered with a non-success status.
    #[error("Unexpected classifier response ({status}): {body}")]
    UnexpectedStatus {
        /// HTTP status returned by the backend.
        status: StatusCode,
        /// Body payload associated with the failing response.
        body: String,
    },
    /// Backend is still loading the model into memory.
    #[error("Model '{model}' is still loading (estimated {estimated_time:?}s)")]
    ModelLoading {
        /// Model identifier that was requested.
        model: String,
        /// Seconds the backend expects loading to take, when reported.
        estimated_time: Option<f64>,
    },
    /// Response body did not match the expected prediction format.
    #[error("Malformed classifier response: {0}")]
    InvalidResponse(String),
    /// Backend returned an empty label distribution.
    #[error("Classifier returned no predictions")]
    EmptyPrediction,
}

/// Top prediction produced for a piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Category assigned by the model.
    pub label: String,
    /// Model score for the label, passed through untouched.
    pub score: f64,
}

/// Interface implemented by classifier backends.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Label the supplied text with the model's highest-scoring category.
    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError>;

    /// Model identifier served by this backend.
    fn model(&self) -> &str;
}

/// Single `{label, score}` entry shared by the supported wire formats.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Prediction {
    pub(crate) label: String,
    pub(crate) score: f64,
}

/// Reduce a label distribution to its highest-scoring entry.
pub(crate) fn select_top(predictions: Vec<Prediction>) -> Result<Classification, ClassifierError> {
    predictions
        .into_iter()
        .max_by(|left, right| left.score.total_cmp(&right.score))
        .map(|Prediction { label, score }| Classification { label, score })
        .ok_or(ClassifierError::EmptyPrediction)
}

/// Build a classifier client for the configured provider.
pub fn get_classifier(
    config: &Config,
) -> Result<Box<dyn TextClassifier + Send + Sync>, ClassifierError> {
    let classifier: Box<dyn TextClassifier + Send + Sync> = match config.classifier_provider {
        ClassifierProvider::HuggingFace => Box::new(HuggingFaceClassifier::new(config)?),
        ClassifierProvider::Tei => Box::new(TeiClassifier::new(config)?),
    };
    tracing::info!(
        provider = ?config.classifier_provider,
        model = classifier.model(),
        url = %config.classifier_url,
        "Classifier client initialized"
    );
    Ok(classifier)
}
