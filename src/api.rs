//! HTTP surface for Vaartha.
//!
//! - `GET /` – Static welcome payload, doubling as a liveness check.
//! - `POST /analyze` – Classify `{"text": ...}` and return
//!   `{"label", "confidence", "sources": [{"publisher", "url"}]}`.
//! - `GET /metrics` – Analysis counters since startup.
//!
//! Errors are returned as `{"detail": message}`: body rejections keep their 4xx status,
//! analysis failures become `500`. CORS is open to every origin.
//!
//! `/analyze` has no body size limit, and a request without `Content-Type` is read as JSON.
//! An explicit non-JSON content type is refused with `415`.

use crate::analysis::{AnalysisApi, AnalysisError};
use crate::factcheck::Source;
use crate::metrics::MetricsSnapshot;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        DefaultBodyLimit, State,
        rejection::{BytesRejection, JsonRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::Instrument;
use uuid::Uuid;

/// Message returned by `GET /`.
pub const WELCOME_MESSAGE: &str = "Welcome to the Fake News Detector API!";

/// Build the HTTP router exposing the analysis API surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: AnalysisApi + 'static,
{
    Router::new()
        .route("/", get(read_root))
        .route("/analyze", post(analyze_text::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .layer(DefaultBodyLimit::disable())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(service)
}

#[derive(Serialize)]
struct WelcomeResponse {
    message: &'static str,
}

async fn read_root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE,
    })
}

/// Request body for the `POST /analyze` endpoint.
#[derive(Deserialize)]
struct AnalyzeRequest {
    /// Text to classify and fact-check.
    text: String,
}

/// Success response for the `POST /analyze` endpoint.
#[derive(Serialize)]
struct AnalyzeResponse {
    label: String,
    confidence: f64,
    sources: Vec<Source>,
}

/// Classify the submitted text and attach fact-check sources.
///
/// Each request runs inside an `analyze` span tagged with a fresh request id.
async fn analyze_text<S>(
    State(service): State<Arc<S>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AnalyzeResponse>, AppError>
where
    S: AnalysisApi,
{
    ensure_json_content_type(&headers)?;
    let Json(AnalyzeRequest { text }) = Json::<AnalyzeRequest>::from_bytes(&body?)?;
    let request_id = Uuid::new_v4();
    let outcome = service
        .analyze(text)
        .instrument(tracing::info_span!("analyze", %request_id))
        .await?;
    tracing::info!(
        %request_id,
        label = %outcome.label,
        confidence = outcome.confidence,
        sources = outcome.sources.len(),
        "Analyze request completed"
    );
    Ok(Json(AnalyzeResponse {
        label: outcome.label,
        confidence: outcome.confidence,
        sources: outcome.sources,
    }))
}

/// Absent `Content-Type` is accepted; anything present must be `application/json` or `*+json`.
fn ensure_json_content_type(headers: &HeaderMap) -> Result<(), AppError> {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return Ok(());
    };
    let essence = value
        .to_str()
        .ok()
        .and_then(|raw| raw.split(';').next())
        .map(|essence| essence.trim().to_ascii_lowercase())
        .unwrap_or_default();
    let is_json = essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"));
    if is_json {
        Ok(())
    } else {
        Err(AppError::rejected(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Expected request with `Content-Type: application/json`".to_string(),
        ))
    }
}

async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<MetricsSnapshot>
where
    S: AnalysisApi,
{
    Json(service.metrics_snapshot())
}

enum AppError {
    Rejected { status: StatusCode, detail: String },
    Analysis(AnalysisError),
}

impl AppError {
    fn rejected(status: StatusCode, detail: String) -> Self {
        tracing::debug!(%status, %detail, "Rejected analyze request");
        Self::Rejected { status, detail }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::Rejected { status, detail } => (status, detail),
            Self::Analysis(error) => (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<AnalysisError> for AppError {
    fn from(inner: AnalysisError) -> Self {
        Self::Analysis(inner)
    }
}
