//! Analysis service coordinating the classifier and the fact-check lookup.

use crate::{
    analysis::types::{AnalysisError, AnalysisOutcome},
    classifier::{TextClassifier, get_classifier},
    config::get_config,
    factcheck::{FactCheckClient, Source, extract_sources, get_fact_check_client},
    metrics::{AnalysisMetrics, MetricsSnapshot},
};
use async_trait::async_trait;

const WARM_UP_TEXT: &str = "Vaartha classifier warm-up.";

/// Labels text with the classifier and attaches fact-check sources.
///
/// Owns long-lived HTTP clients for both upstreams. Construct it once near process start and
/// share it through an `Arc`.
pub struct AnalysisService {
    classifier: Box<dyn TextClassifier + Send + Sync>,
    fact_check: Option<Box<dyn FactCheckClient + Send + Sync>>,
    metrics: AnalysisMetrics,
}

/// Abstraction over the analysis pipeline used by the HTTP surface.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Classify `text` and merge in any fact-check sources.
    async fn analyze(&self, text: String) -> Result<AnalysisOutcome, AnalysisError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl AnalysisService {
    /// Build the service from the global configuration and warm the classifier up.
    pub async fn new() -> Result<Self, AnalysisError> {
        let config = get_config();
        let classifier = get_classifier(config)?;
        let fact_check = get_fact_check_client(config)?;
        let service = Self::with_clients(classifier, fact_check);
        service.warm_up().await;
        Ok(service)
    }

    /// Assemble a service from pre-built clients.
    pub fn with_clients(
        classifier: Box<dyn TextClassifier + Send + Sync>,
        fact_check: Option<Box<dyn FactCheckClient + Send + Sync>>,
    ) -> Self {
        Self {
            classifier,
            fact_check,
            metrics: AnalysisMetrics::new(),
        }
    }

    /// Issue one throwaway classification so the model is resident before real traffic.
    ///
    /// Failure is logged and otherwise ignored; the first real request will surface it.
    pub async fn warm_up(&self) {
        tracing::info!(model = self.classifier.model(), "Warming up classifier");
        match self.classifier.classify(WARM_UP_TEXT).await {
            Ok(result) => tracing::info!(
                model = self.classifier.model(),
                label = %result.label,
                "Classifier ready"
            ),
            Err(error) => tracing::warn!(
                model = self.classifier.model(),
                error = %error,
                "Classifier warm-up failed; continuing"
            ),
        }
    }

    /// Classify the text, then look up fact-check sources for it.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisOutcome, AnalysisError> {
        tracing::info!(chars = text.chars().count(), "Analyzing text");
        let classification = match self.classifier.classify(text).await {
            Ok(classification) => classification,
            Err(error) => {
                self.metrics.record_classifier_failure();
                tracing::error!(error = %error, "Classifier call failed");
                return Err(error.into());
            }
        };
        tracing::info!(
            label = %classification.label,
            score = classification.score,
            "Classifier result"
        );

        let sources = self.lookup_sources(text).await.unwrap_or_default();
        tracing::info!(sources = sources.len(), "Extracted fact-check sources");

        self.metrics.record_analysis(sources.len() as u64);
        Ok(AnalysisOutcome {
            label: classification.label,
            confidence: classification.score,
            sources,
        })
    }

    /// Query the fact-check service; every failure is swallowed and reported as `None`.
    async fn lookup_sources(&self, text: &str) -> Option<Vec<Source>> {
        let client = self.fact_check.as_ref()?;
        if text.trim().is_empty() {
            tracing::debug!("Skipping fact-check lookup for blank text");
            return None;
        }
        match client.search_claims(text).await {
            Ok(claims) => {
                tracing::debug!(claims = claims.len(), "Fact-check response received");
                Some(extract_sources(&claims))
            }
            Err(error) => {
                self.metrics.record_fact_check_failure();
                tracing::warn!(error = %error, "Fact-check lookup failed; returning no sources");
                None
            }
        }
    }

    /// Retrieve the current metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[async_trait]
impl AnalysisApi for AnalysisService {
    async fn analyze(&self, text: String) -> Result<AnalysisOutcome, AnalysisError> {
        AnalysisService::analyze(self, &text).await
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        AnalysisService::metrics_snapshot(self)
    }
}
