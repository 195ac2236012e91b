use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};

use docinsight::application::ports::{DocumentAnalyzer, DocumentAnalyzerError};
use docinsight::domain::UploadedDocument;
use docinsight::infrastructure::document_analysis::{
    AnalyzeResponse, AzureDocIntelAdapter, PollingConfig,
};

use crate::support::start_mock_server;

#[derive(Clone)]
struct MockAzure {
    base_url: Arc<Mutex<String>>,
    polls: Arc<AtomicUsize>,
    submitted: Arc<Mutex<Option<(HeaderMap, Value)>>>,
    final_status: Value,
    running_polls: usize,
}

impl MockAzure {
    fn new(final_status: Value, running_polls: usize) -> Self {
        Self {
            base_url: Arc::new(Mutex::new(String::new())),
            polls: Arc::new(AtomicUsize::new(0)),
            submitted: Arc::new(Mutex::new(None)),
            final_status,
            running_polls,
        }
    }
}

async fn submit(
    State(mock): State<MockAzure>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    *mock.submitted.lock().unwrap() = Some((headers, body));
    let location = format!("{}/operations/op-1", mock.base_url.lock().unwrap());
    (StatusCode::ACCEPTED, [("operation-location", location)]).into_response()
}

async fn poll(State(mock): State<MockAzure>) -> Response {
    let call = mock.polls.fetch_add(1, Ordering::SeqCst);
    if call < mock.running_polls {
        return axum::Json(json!({ "status": "running" })).into_response();
    }
    axum::Json(mock.final_status.clone()).into_response()
}

async fn start_azure(mock: MockAzure) -> (String, tokio::sync::oneshot::Sender<()>) {
    let app = Router::new()
        .route("/documentintelligence/documentModels/{*model}", post(submit))
        .route("/operations/{id}", get(poll))
        .with_state(mock.clone());
    let (base_url, shutdown) = start_mock_server(app).await;
    *mock.base_url.lock().unwrap() = base_url.clone();
    (base_url, shutdown)
}

fn fast_polling() -> PollingConfig {
    PollingConfig {
        interval: Duration::from_millis(10),
        timeout: Duration::from_secs(5),
    }
}

fn layout_result() -> Value {
    json!({
        "status": "succeeded",
        "analyzeResult": {
            "content": "Invoice INV-7\nTotal: 120 EUR",
            "pages": [
                { "words": [{ "confidence": 0.9 }, { "confidence": 0.8 }] },
                { "words": [{ "confidence": 1.0 }] }
            ],
            "tables": [{ "rowCount": 2 }],
            "paragraphs": [{ "content": "Invoice INV-7" }, { "content": "Total: 120 EUR" }],
            "languages": [{ "locale": "en" }, { "locale": "de" }, { "locale": "en" }],
            "keyValuePairs": [
                { "key": { "content": "Invoice" }, "value": { "content": "INV-7" } },
                { "key": { "content": "Signature" } },
                { "key": { "content": " " }, "value": { "content": "dropped" } }
            ]
        }
    })
}

fn invoice() -> UploadedDocument {
    UploadedDocument::from_upload("invoice.pdf".to_string(), b"%PDF".to_vec()).unwrap()
}

#[tokio::test]
async fn given_running_then_succeeded_operation_when_analyzing_then_maps_layout_result() {
    let mock = MockAzure::new(layout_result(), 2);
    let (base_url, _shutdown) = start_azure(mock.clone()).await;
    let adapter =
        AzureDocIntelAdapter::new(reqwest::Client::new(), &base_url, "doc-key", fast_polling());

    let analysis = adapter.analyze(&invoice()).await.unwrap();

    assert_eq!(analysis.content, "Invoice INV-7\nTotal: 120 EUR");
    assert_eq!(analysis.statistics.pages, 2);
    assert_eq!(analysis.statistics.tables, 1);
    assert_eq!(analysis.statistics.paragraphs, 2);
    assert_eq!(analysis.statistics.confidence, "90.0%");
    assert_eq!(analysis.languages, vec!["en", "de"]);
    assert_eq!(analysis.key_value_pairs.len(), 2);
    assert_eq!(analysis.key_value_pairs["Invoice"], "INV-7");
    assert_eq!(analysis.key_value_pairs["Signature"], "");
    assert_eq!(mock.polls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn given_upload_when_submitting_then_sends_key_header_and_base64_source() {
    let mock = MockAzure::new(layout_result(), 0);
    let (base_url, _shutdown) = start_azure(mock.clone()).await;
    let adapter =
        AzureDocIntelAdapter::new(reqwest::Client::new(), &base_url, "doc-key", fast_polling());

    adapter.analyze(&invoice()).await.unwrap();

    let (headers, body) = mock.submitted.lock().unwrap().clone().unwrap();
    assert_eq!(headers["ocp-apim-subscription-key"], "doc-key");
    assert_eq!(body["base64Source"], "JVBERg==");
}

#[tokio::test]
async fn given_failed_operation_when_analyzing_then_returns_analysis_failed_with_reason() {
    let failed = json!({
        "status": "failed",
        "error": { "code": "InvalidContent", "message": "The file is corrupted." }
    });
    let (base_url, _shutdown) = start_azure(MockAzure::new(failed, 0)).await;
    let adapter =
        AzureDocIntelAdapter::new(reqwest::Client::new(), &base_url, "doc-key", fast_polling());

    let result = adapter.analyze(&invoice()).await;

    match result {
        Err(DocumentAnalyzerError::AnalysisFailed(reason)) => {
            assert_eq!(reason, "InvalidContent: The file is corrupted.")
        }
        other => panic!("expected AnalysisFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn given_operation_never_finishes_when_analyzing_then_times_out() {
    let (base_url, _shutdown) = start_azure(MockAzure::new(json!({}), usize::MAX)).await;
    let polling = PollingConfig {
        interval: Duration::from_millis(10),
        timeout: Duration::from_millis(150),
    };
    let adapter = AzureDocIntelAdapter::new(reqwest::Client::new(), &base_url, "doc-key", polling);

    let result = adapter.analyze(&invoice()).await;

    assert!(matches!(result, Err(DocumentAnalyzerError::Timeout(_))));
}

#[tokio::test]
async fn given_submit_rejected_when_analyzing_then_returns_api_request_failed() {
    let app = Router::new().route(
        "/documentintelligence/documentModels/{*model}",
        post(|| async { (StatusCode::UNAUTHORIZED, "invalid subscription key") }),
    );
    let (base_url, _shutdown) = start_mock_server(app).await;
    let adapter =
        AzureDocIntelAdapter::new(reqwest::Client::new(), &base_url, "bad-key", fast_polling());

    let result = adapter.analyze(&invoice()).await;

    match result {
        Err(DocumentAnalyzerError::ApiRequestFailed(message)) => {
            assert!(message.contains("401"));
            assert!(message.contains("invalid subscription key"));
        }
        other => panic!("expected ApiRequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn given_submit_without_operation_location_when_analyzing_then_returns_invalid_response() {
    let app = Router::new().route(
        "/documentintelligence/documentModels/{*model}",
        post(|| async { StatusCode::ACCEPTED }),
    );
    let (base_url, _shutdown) = start_mock_server(app).await;
    let adapter =
        AzureDocIntelAdapter::new(reqwest::Client::new(), &base_url, "doc-key", fast_polling());

    let result = adapter.analyze(&invoice()).await;

    assert!(matches!(
        result,
        Err(DocumentAnalyzerError::InvalidResponse(_))
    ));
}

#[test]
fn given_result_without_words_when_mapping_then_confidence_is_not_available() {
    let response: AnalyzeResponse = serde_json::from_value(json!({
        "status": "succeeded",
        "analyzeResult": { "content": "", "pages": [{ "words": [] }] }
    }))
    .unwrap();

    let analysis = response.analyze_result.unwrap().into_analysis();

    assert_eq!(analysis.statistics.pages, 1);
    assert_eq!(analysis.statistics.confidence, "n/a");
    assert!(!analysis.has_content());
    assert!(analysis.languages.is_empty());
}
