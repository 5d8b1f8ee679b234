//! Fact-check search integration.
//!
//! Looks up published claim reviews for the submitted text. Callers treat every failure here
//! as "no sources"; the error type exists so the failure can be logged and counted.

mod sources;
mod types;

pub use sources::{PLACEHOLDER_URL, Source, UNKNOWN_PUBLISHER, extract_sources};
pub use types::{Claim, ClaimReview, ClaimSearchResponse, Publisher};

use crate::config::Config;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

/// Errors returned while querying the fact-check service.
#[derive(Debug, Error)]
pub enum FactCheckError {
    /// HTTP layer failed before a response was received.
    #[error("Fact-check request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Service answered with a status other than 200.
    #[error("Unexpected fact-check response ({status}): {body}")]
    UnexpectedStatus {
        /// HTTP status returned by the service.
        status: StatusCode,
        /// Body payload associated with the failing response.
        body: String,
    },
    /// Response body could not be decoded.
    #[error("Malformed fact-check response: {0}")]
    InvalidResponse(String),
}

/// Interface implemented by fact-check search providers.
#[async_trait]
pub trait FactCheckClient: Send + Sync {
    /// Return claims whose reviews match `query`.
    async fn search_claims(&self, query: &str) -> Result<Vec<Claim>, FactCheckError>;
}

/// Client for the Google Fact Check Tools claim search API.
pub struct GoogleFactCheckClient {
    pub(crate) http: Client,
    pub(crate) url: String,
    pub(crate) api_key: String,
    pub(crate) language_code: Option<String>,
    pub(crate) page_size: Option<u32>,
}

impl GoogleFactCheckClient {
    /// Construct a client from configuration and an explicit API key.
    pub fn new(config: &Config, api_key: String) -> Result<Self, FactCheckError> {
        let http = Client::builder()
            .user_agent("vaartha/fact-check")
            .timeout(config.http_timeout())
            .build()?;
        Ok(Self {
            http,
            url: config.fact_check_url.clone(),
            api_key,
            language_code: config.fact_check_language_code.clone(),
            page_size: config.fact_check_page_size,
        })
    }
}

#[async_trait]
impl FactCheckClient for GoogleFactCheckClient {
    async fn search_claims(&self, query: &str) -> Result<Vec<Claim>, FactCheckError> {
        let mut request = self
            .http
            .get(&self.url)
            .query(&[("query", query), ("key", self.api_key.as_str())]);
        if let Some(language_code) = self.language_code.as_deref() {
            request = request.query(&[("languageCode", language_code)]);
        }
        if let Some(page_size) = self.page_size {
            request = request.query(&[("pageSize", page_size)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(FactCheckError::UnexpectedStatus { status, body });
        }

        let body: ClaimSearchResponse = response.json().await.map_err(|error| {
            FactCheckError::InvalidResponse(format!("failed to decode claim search: {error}"))
        })?;
        tracing::debug!(
            claims = body.claims.len(),
            has_next_page = body.next_page_token.is_some(),
            "Fact-check search completed"
        );
        Ok(body.claims)
    }
}

/// Build the fact-check client, or `None` when no API key is configured.
pub fn get_fact_check_client(
    config: &Config,
) -> Result<Option<Box<dyn FactCheckClient + Send + Sync>>, FactCheckError> {
    let Some(api_key) = config.fact_check_api_key.clone() else {
        tracing::warn!("FACT_CHECK_API_KEY not set; fact-check sources disabled");
        return Ok(None);
    };
    let client: Box<dyn FactCheckClient + Send + Sync> =
        Box::new(GoogleFactCheckClient::new(config, api_key)?);
    tracing::info!(url = %config.fact_check_url, "Fact-check client initialized");
    Ok(Some(client))
}
