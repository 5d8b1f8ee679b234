//! Hugging Face Inference API adapter.

use super::{Classification, ClassifierError, Prediction, TextClassifier, select_top};
use crate::config::Config;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

/// Classifier backed by the hosted Hugging Face text-classification pipeline.
pub struct HuggingFaceClassifier {
    pub(crate) http: Client,
    pub(crate) base_url: String,
    pub(crate) model: String,
    pub(crate) api_token: Option<String>,
}

impl HuggingFaceClassifier {
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
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}",
            self.base_url.trim_end_matches('/'),
            self.model.trim_start_matches('/')
        )
    }
}

/// The router returns a flat distribution; the legacy API nests it per input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<Prediction>>),
    Flat(Vec<Prediction>),
}

impl InferenceResponse {
    fn into_predictions(self) -> Vec<Prediction> {
        match self {
            Self::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            Self::Flat(predictions) => predictions,
        }
    }
}

/// Model-loading body sent with a 503. Gateway 503s lack `error` and are not a loading model.
#[derive(Debug, Deserialize)]
struct InferenceErrorBody {
    error: String,
    #[serde(default)]
    estimated_time: Option<f64>,
}

#[async_trait]
impl TextClassifier for HuggingFaceClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError> {
        let payload = json!({
            "inputs": text,
            "options": { "wait_for_model": true },
        });

        let mut request = self.http.post(self.endpoint()).json(&payload);
        if let Some(token) = self.api_token.as_deref() {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        let status = response.status();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            let body = response.text().await.unwrap_or_default();
            if let Ok(InferenceErrorBody {
                error,
                estimated_time,
            }) = serde_json::from_str(&body)
            {
                tracing::warn!(model = %self.model, ?estimated_time, %error, "Model is loading");
                return Err(ClassifierError::ModelLoading {
                    model: self.model.clone(),
                    estimated_time,
                });
            }
            return Err(ClassifierError::UnexpectedStatus { status, body });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, model = %self.model, "Hugging Face inference failed");
            return Err(ClassifierError::UnexpectedStatus { status, body });
        }

        let body: InferenceResponse = response.json().await.map_err(|error| {
            ClassifierError::InvalidResponse(format!(
                "failed to decode Hugging Face response: {error}"
            ))
        })?;

        select_top(body.into_predictions())
    }

    fn model(&self) -> &str {
        &self.model
    }
}
