use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing analysis activity.
#[derive(Default)]
pub struct AnalysisMetrics {
    analyses_completed: AtomicU64,
    classifier_failures: AtomicU64,
    fact_check_failures: AtomicU64,
    sources_returned: AtomicU64,
}

impl AnalysisMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed analysis and the number of sources attached to it.
    pub fn record_analysis(&self, source_count: u64) {
        self.analyses_completed.fetch_add(1, Ordering::Relaxed);
        self.sources_returned
            .fetch_add(source_count, Ordering::Relaxed);
    }

    /// Record a classification that failed and aborted the request.
    pub fn record_classifier_failure(&self) {
        self.classifier_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a fact-check lookup whose failure was suppressed.
    pub fn record_fact_check_failure(&self) {
        self.fact_check_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            analyses_completed: self.analyses_completed.load(Ordering::Relaxed),
            classifier_failures: self.classifier_failures.load(Ordering::Relaxed),
            fact_check_failures: self.fact_check_failures.load(Ordering::Relaxed),
            sources_returned: self.sources_returned.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of analysis counters used for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Analyses that produced a response since startup.
    pub analyses_completed: u64,
    /// Requests that failed because the classifier errored.
    pub classifier_failures: u64,
    /// Fact-check lookups that failed and were treated as "no sources".
    pub fact_check_failures: u64,
    /// Total sources attached across all completed analyses.
    pub sources_returned: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_analyses_and_sources() {
        let metrics = AnalysisMetrics::new();
        metrics.record_analysis(2);
        metrics.record_analysis(0);
        metrics.record_fact_check_failure();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.analyses_completed, 2);
        assert_eq!(snapshot.sources_returned, 2);
        assert_eq!(snapshot.fact_check_failures, 1);
        assert_eq!(snapshot.classifier_failures, 0);
    }

    #[test]
    fn snapshot_starts_empty() {
        let metrics = AnalysisMetrics::new();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }
}
