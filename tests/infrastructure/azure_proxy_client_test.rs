use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use serde_json::{Value, json};

use docinsight::application::ports::{CloudProxy, ProxyError};
use docinsight::infrastructure::proxy::{
    AzureProxyClient, COMPLETIONS_PATH, ProxyTargets, SENTIMENT_PATH,
};

use crate::support::start_mock_server;

type Captured = Arc<Mutex<Option<(HeaderMap, Value)>>>;

async fn capture(
    State(captured): State<Captured>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<Value>,
) -> axum::Json<Value> {
    *captured.lock().unwrap() = Some((headers, body));
    axum::Json(json!({ "id": "cmpl-1", "choices": [{ "text": "Paris" }], "extra": { "kept": true } }))
}

fn targets(base_url: &str) -> ProxyTargets {
    ProxyTargets {
        completion_endpoint: base_url.to_string(),
        completion_key: "openai-key".to_string(),
        cognitive_endpoint: format!("{base_url}/"),
        cognitive_key: "cog-key".to_string(),
        max_tokens: 50,
    }
}

#[tokio::test]
async fn given_prompt_when_requesting_completion_then_relays_upstream_json_verbatim() {
    let captured: Captured = Arc::default();
    let app = Router::new()
        .route(COMPLETIONS_PATH, post(capture))
        .with_state(captured.clone());
    let (base_url, _shutdown) = start_mock_server(app).await;
    let client = AzureProxyClient::new(reqwest::Client::new(), targets(&base_url));

    let body = client.completion("Capital of France?").await.unwrap();

    assert_eq!(
        body,
        json!({ "id": "cmpl-1", "choices": [{ "text": "Paris" }], "extra": { "kept": true } })
    );
    let (headers, sent) = captured.lock().unwrap().clone().unwrap();
    assert_eq!(headers["api-key"], "openai-key");
    assert_eq!(sent, json!({ "prompt": "Capital of France?", "max_tokens": 50 }));
}

#[tokio::test]
async fn given_text_when_requesting_sentiment_then_sends_single_english_document() {
    let captured: Captured = Arc::default();
    let app = Router::new()
        .route(SENTIMENT_PATH, post(capture))
        .with_state(captured.clone());
    let (base_url, _shutdown) = start_mock_server(app).await;
    let client = AzureProxyClient::new(reqwest::Client::new(), targets(&base_url));

    client.sentiment("I love this").await.unwrap();

    let (headers, sent) = captured.lock().unwrap().clone().unwrap();
    assert_eq!(headers["ocp-apim-subscription-key"], "cog-key");
    assert_eq!(
        sent,
        json!({ "documents": [{ "id": "1", "language": "en", "text": "I love this" }] })
    );
}

#[tokio::test]
async fn given_upstream_error_status_when_forwarding_then_returns_upstream_status() {
    let app = Router::new().route(
        SENTIMENT_PATH,
        post(|| async { (StatusCode::UNAUTHORIZED, "Access denied due to invalid subscription key") }),
    );
    let (base_url, _shutdown) = start_mock_server(app).await;
    let client = AzureProxyClient::new(reqwest::Client::new(), targets(&base_url));

    let result = client.sentiment("text").await;

    match result {
        Err(ProxyError::UpstreamStatus { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "Access denied due to invalid subscription key");
        }
        other => panic!("expected UpstreamStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn given_non_json_upstream_body_when_forwarding_then_returns_invalid_body() {
    let app = Router::new().route(COMPLETIONS_PATH, post(|| async { "plain text, not json" }));
    let (base_url, _shutdown) = start_mock_server(app).await;
    let client = AzureProxyClient::new(reqwest::Client::new(), targets(&base_url));

    let result = client.completion("prompt").await;

    assert!(matches!(result, Err(ProxyError::InvalidBody(_))));
}

#[tokio::test]
async fn given_unconfigured_endpoint_when_forwarding_then_returns_transport_error() {
    let client = AzureProxyClient::new(reqwest::Client::new(), ProxyTargets::default());

    let result = client.completion("prompt").await;

    assert!(matches!(result, Err(ProxyError::Transport(_))));
}
