//! Wire types for the Google Fact Check Tools `claims:search` response.
//!
//! Every field is optional upstream; an empty result set arrives as `{}`.

use serde::Deserialize;

/// Top-level claim search response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSearchResponse {
    /// Claims matching the query, in relevance order.
    #[serde(default)]
    pub claims: Vec<Claim>,
    /// Token for the next page of results.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// A claim that has been reviewed by one or more publishers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// Text of the claim.
    pub text: Option<String>,
    /// Person or organization that made the claim.
    pub claimant: Option<String>,
    /// When the claim was made.
    pub claim_date: Option<String>,
    /// Reviews of this claim.
    #[serde(default)]
    pub claim_review: Vec<ClaimReview>,
}

/// A single publisher's review of a claim.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReview {
    /// Publisher of the review.
    pub publisher: Option<Publisher>,
    /// Link to the review article.
    pub url: Option<String>,
    /// Headline of the review article.
    pub title: Option<String>,
    /// Date the review was published.
    pub review_date: Option<String>,
    /// Verdict in the publisher's own words ("False", "Misleading", ...).
    pub textual_rating: Option<String>,
    /// Language of the review.
    pub language_code: Option<String>,
}

/// Organization that published a review.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Publisher {
    /// Display name.
    pub name: Option<String>,
    /// Publisher's site.
    pub site: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_decodes_to_no_claims() {
        let response: ClaimSearchResponse = serde_json::from_value(json!({})).expect("decode");
        assert!(response.claims.is_empty());
        assert!(response.next_page_token.is_none());
    }

    #[test]
    fn decodes_camel_case_fields() {
        let response: ClaimSearchResponse = serde_json::from_value(json!({
            "claims": [{
                "text": "Drinking bleach cures flu",
                "claimant": "Social media",
                "claimDate": "2024-01-02T00:00:00Z",
                "claimReview": [{
                    "publisher": { "name": "Snopes", "site": "snopes.com" },
                    "url": "https://www.snopes.com/fact-check/bleach",
                    "title": "No, bleach does not cure flu",
                    "reviewDate": "2024-01-03T00:00:00Z",
                    "textualRating": "False",
                    "languageCode": "en"
                }]
            }],
            "nextPageToken": "CAo"
        }))
        .expect("decode");

        let claim = &response.claims[0];
        assert_eq!(claim.claim_date.as_deref(), Some("2024-01-02T00:00:00Z"));
        let review = &claim.claim_review[0];
        assert_eq!(review.textual_rating.as_deref(), Some("False"));
        assert_eq!(
            review.publisher.as_ref().and_then(|p| p.site.as_deref()),
            Some("snopes.com")
        );
        assert_eq!(response.next_page_token.as_deref(), Some("CAo"));
    }
}
