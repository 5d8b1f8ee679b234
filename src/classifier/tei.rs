//! Text Embeddings Inference (`/predict`) adapter for self-hosted sequence classifiers.

use super::{Classification, ClassifierError, Prediction, TextClassifier, select_top};
use crate::config::Config;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// Classifier backed by a TEI server that has the model resident in memory.
pub struct TeiClassifier {
    pub(crate) http: Client,
    pub(crate) base_url: String,
    pub(crate) model: String,
    pub(crate) api_token: Option<String>,
    pub(crate) truncate: bool,
}

impl TeiClassifier {
    /// Construct a client using the classifier settings from `config`.
    pub fn new(config: &Config) -> Result<Self, ClassifierError> {
        let http = Client::builder()
            .user_agent("vaartha/classifier")
            .timeout(config.http_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.classifier_url.clone(),
            model: config.classifier_model.clone(),
            api_token: config.classifier_api_token.clone(),
            truncate: config.classifier_truncate,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/predict", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextClassifier for TeiClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError> {
        let payload = json!({
            "inputs": text,
            "truncate": self.truncate,
        });

        let mut request = self.http.post(self.endpoint()).json(&payload);
        if let Some(token) = self.api_token.as_deref() {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, url = %self.base_url, "TEI prediction failed");
            return Err(ClassifierError::UnexpectedStatus { status, body });
        }

        let predictions: Vec<Prediction> = response.json().await.map_err(|error| {
            ClassifierError::InvalidResponse(format!("failed to decode TEI response: {error}"))
        })?;

        select_top(predictions)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};

    fn client_for(server: &MockServer) -> TeiClassifier {
        TeiClassifier {
            http: Client::builder()
                .user_agent("vaartha-test")
                .build()
                .expect("client"),
            base_url: format!("{}/", server.base_url()),
            model: "roberta-base-openai-detector".into(),
            api_token: None,
            truncate: true,
        }
    }

    #[tokio::test]
    async fn predict_sends_truncate_flag_and_picks_top_label() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/predict")
                    .json_body(json!({ "inputs": "Breaking news", "truncate": true }));
                then.status(200).json_body(json!([
                    { "score": 0.64, "label": "Real" },
                    { "score": 0.36, "label": "Fake" }
                ]));
            })
            .await;

        let result = client_for(&server)
            .classify("Breaking news")
            .await
            .expect("classification");

        mock.assert();
        assert_eq!(
            result,
            Classification {
                label: "Real".into(),
                score: 0.64
            }
        );
    }

    #[tokio::test]
    async fn predict_maps_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/predict");
                then.status(413).body("input too long");
            })
            .await;

        let error = client_for(&server)
            .classify("x")
            .await
            .expect_err("error status");

        assert!(matches!(error, ClassifierError::UnexpectedStatus { body, .. } if body == "input too long"));
    }
}
