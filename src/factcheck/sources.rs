//! Reshaping of claim reviews into `(publisher, url)` sources.

use super::types::{Claim, ClaimReview};
use serde::Serialize;

/// Publisher name used when a review does not name one.
pub const UNKNOWN_PUBLISHER: &str = "Unknown Publisher";
/// Link used when a review has no usable absolute URL.
pub const PLACEHOLDER_URL: &str = "#";

/// Fact-check source attached to an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    /// Name of the reviewing publisher.
    pub publisher: String,
    /// Link to the review, or `#` when unavailable.
    pub url: String,
}

/// Map each claim's first review to a source, preserving claim order.
///
/// Claims without reviews still produce a source so the count matches the number of
/// claims returned upstream.
pub fn extract_sources(claims: &[Claim]) -> Vec<Source> {
    let empty = ClaimReview::default();
    claims
        .iter()
        .map(|claim| {
            let review = claim.claim_review.first().unwrap_or(&empty);
            Source {
                publisher: publisher_name(review),
                url: sanitize_url(review.url.as_deref()),
            }
        })
        .collect()
}

fn publisher_name(review: &ClaimReview) -> String {
    review
        .publisher
        .as_ref()
        .and_then(|publisher| publisher.name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_PUBLISHER)
        .to_string()
}

fn sanitize_url(url: Option<&str>) -> String {
    match url.map(str::trim) {
        Some(url) if is_absolute_http(url) => url.to_string(),
        _ => PLACEHOLDER_URL.to_string(),
    }
}

fn is_absolute_http(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    ["http://", "https://"]
        .iter()
        .any(|scheme| lower.starts_with(scheme) && lower.len() > scheme.len())
}
