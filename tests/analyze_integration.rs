use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use httpmock::{Method::GET, Method::POST, MockServer};
use serde_json::{Value, json};
use tokio::sync::OnceCell;
use tower::ServiceExt;
use vaartha::{analysis::AnalysisService, api, config};

static MOCK_SERVER: OnceCell<&'static MockServer> = OnceCell::const_new();

const CLAIM_SEARCH_PATH: &str = "/v1alpha1/claims:search";

fn set_env(key: &str, value: &str) {
    // SAFETY: Tests run in a single process and establish deterministic configuration upfront.
    unsafe { std::env::set_var(key, value) }
}

/// Start the shared upstream mock and point the global configuration at it.
async fn upstream() -> &'static MockServer {
    MOCK_SERVER
        .get_or_init(|| async {
            let server: &'static MockServer = Box::leak(Box::new(MockServer::start_async().await));
            set_env("CLASSIFIER_PROVIDER", "tei");
            set_env("CLASSIFIER_URL", &server.base_url());
            set_env("CLASSIFIER_MODEL", "roberta-base-openai-detector");
            set_env("FACT_CHECK_URL", &server.url(CLAIM_SEARCH_PATH));
            set_env("FACT_CHECK_API_KEY", "integration-key");
            set_env("HTTP_TIMEOUT_SECS", "5");
            config::init_config().expect("valid configuration");

            server
                .mock_async(|when, then| {
                    when.method(POST)
                        .path("/predict")
                        .body_contains("classifier warm-up");
                    then.status(200)
                        .json_body(json!([{ "label": "Real", "score": 0.5 }]));
                })
                .await;
            server
        })
        .await
}

async fn post_analyze(text: &str) -> (StatusCode, Value) {
    let service = AnalysisService::new().await.expect("analysis service");
    let app = api::create_router(Arc::new(service));
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/analyze")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "text": text }).to_string()))
                .expect("request"),
        )
        .await
        .expect("router response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    (status, serde_json::from_slice(&body).expect("json body"))
}

#[tokio::test]
async fn analyze_merges_classifier_label_and_fact_check_sources() {
    let server = upstream().await;
    let text = "The moon landing was staged in a studio";

    let predict = server
        .mock_async(|when, then| {
            when.method(POST).path("/predict").body_contains("moon landing");
            then.status(200).json_body(json!([
                { "label": "Real", "score": 0.03 },
                { "label": "Fake", "score": 0.97 }
            ]));
        })
        .await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(CLAIM_SEARCH_PATH)
                .query_param("query", text)
                .query_param("key", "integration-key");
            then.status(200).json_body(json!({
                "claims": [
                    {
                        "text": "Moon landing was faked",
                        "claimReview": [
                            {
                                "publisher": { "name": "PolitiFact", "site": "politifact.com" },
                                "url": "https://www.politifact.com/moon"
                            },
                            {
                                "publisher": { "name": "Ignored second review" },
                                "url": "https://example.org/ignored"
                            }
                        ]
                    },
                    {
                        "text": "Studio footage",
                        "claimReview": [{ "url": "/relative/link" }]
                    }
                ]
            }));
        })
        .await;

    let (status, body) = post_analyze(text).await;

    predict.assert_async().await;
    search.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "label": "Fake",
            "confidence": 0.97,
            "sources": [
                { "publisher": "PolitiFact", "url": "https://www.politifact.com/moon" },
                { "publisher": "Unknown Publisher", "url": "#" }
            ]
        })
    );
}

#[tokio::test]
async fn fact_check_failure_still_returns_classification() {
    let server = upstream().await;
    let text = "Central bank raises interest rates";

    server
        .mock_async(|when, then| {
            when.method(POST).path("/predict").body_contains("interest rates");
            then.status(200)
                .json_body(json!([{ "label": "Real", "score": 0.81 }]));
        })
        .await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(CLAIM_SEARCH_PATH)
                .query_param("query", text);
            then.status(429).body("Quota exceeded");
        })
        .await;

    let (status, body) = post_analyze(text).await;

    search.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "Real");
    assert_eq!(body["confidence"], 0.81);
    assert_eq!(body["sources"], json!([]));
}

#[tokio::test]
async fn classifier_failure_is_reported_as_server_error() {
    let server = upstream().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/predict").body_contains("classifier outage");
            then.status(500).body("model crashed");
        })
        .await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(CLAIM_SEARCH_PATH)
                .query_param("query", "classifier outage");
            then.status(200).json_body(json!({}));
        })
        .await;

    let (status, body) = post_analyze("classifier outage").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().expect("detail string");
    assert!(detail.contains("500"), "unexpected detail: {detail}");
    assert!(detail.contains("model crashed"), "unexpected detail: {detail}");
    assert_eq!(search.hits_async().await, 0);
}
