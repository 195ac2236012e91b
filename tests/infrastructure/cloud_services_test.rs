use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use docinsight::infrastructure::cloud::{
    CloudServices, CloudServicesError, CloudServicesHandle, ServiceMode,
};
use docinsight::infrastructure::document_analysis::MockDocumentAnalyzer;
use docinsight::infrastructure::llm::MockInsightGenerator;
use docinsight::presentation::{DemoSettings, HttpSettings};

fn demo_settings() -> DemoSettings {
    DemoSettings {
        port: 8501,
        mock_mode: false,
        doc_intel_endpoint: Some("https://docs.cognitiveservices.azure.com".to_string()),
        doc_intel_key: Some("doc-key".to_string()),
        openai_endpoint: Some("https://chat.openai.azure.com".to_string()),
        openai_key: Some("openai-key".to_string()),
        openai_deployment: "gpt-4o-mini".to_string(),
        openai_api_version: "2024-06-01".to_string(),
        insight_max_tokens: 800,
        max_prompt_chars: 12_000,
        max_upload_mb: 20,
        session_idle_minutes: 30,
        max_sessions: 1_000,
        poll_interval_ms: 1_000,
        poll_timeout_secs: 120,
    }
}

fn http_settings() -> HttpSettings {
    HttpSettings { timeout_secs: 30 }
}

#[test]
fn given_complete_settings_when_connecting_then_builds_live_services() {
    assert!(CloudServices::connect(&demo_settings(), &http_settings()).is_ok());
}

#[test]
fn given_mock_mode_when_connecting_then_refuses_live_services() {
    let mut demo = demo_settings();
    demo.mock_mode = true;

    let result = CloudServices::connect(&demo, &http_settings());

    assert!(matches!(result, Err(CloudServicesError::MockModeForced)));
}

#[test]
fn given_blank_key_when_connecting_then_reports_missing_setting() {
    let mut demo = demo_settings();
    demo.openai_key = Some("   ".to_string());

    let result = CloudServices::connect(&demo, &http_settings());

    match result {
        Err(e) => assert_eq!(e.to_string(), "AZURE_OPENAI_KEY is not configured"),
        Ok(_) => panic!("expected missing setting error"),
    }
}

#[test]
fn given_malformed_endpoint_when_connecting_then_reports_invalid_endpoint() {
    let mut demo = demo_settings();
    demo.doc_intel_endpoint = Some("not a url".to_string());

    let result = CloudServices::connect(&demo, &http_settings());

    assert!(matches!(
        result,
        Err(CloudServicesError::InvalidEndpoint { .. })
    ));
}

#[tokio::test]
async fn given_missing_credentials_when_resolving_then_falls_back_to_mock_mode() {
    let mut demo = demo_settings();
    demo.doc_intel_endpoint = None;
    let handle = CloudServicesHandle::new(demo, http_settings());

    let services = handle.resolve().await;

    assert_eq!(services.mode, ServiceMode::Mock);
    assert_eq!(
        services.unavailable_reason.as_deref(),
        Some("AZURE_DOC_INTEL_ENDPOINT is not configured")
    );
}

#[tokio::test]
async fn given_valid_settings_when_resolving_then_runs_in_live_mode() {
    let handle = CloudServicesHandle::new(demo_settings(), http_settings());

    let services = handle.resolve().await;

    assert_eq!(services.mode, ServiceMode::Live);
    assert!(services.unavailable_reason.is_none());
}

#[tokio::test]
async fn given_failing_connector_when_resolving_repeatedly_then_connects_only_once() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();
    let handle = Arc::new(CloudServicesHandle::with_connector(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Err(CloudServicesError::ClientInit("tls backend unavailable".to_string()))
    }));

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let handle = handle.clone();
            tokio::spawn(async move { handle.resolve().await.mode })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap(), ServiceMode::Mock);
    }
    handle.resolve().await;

    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_successful_connector_when_resolving_twice_then_reuses_same_pipeline() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();
    let handle = CloudServicesHandle::with_connector(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(CloudServices::from_parts(
            Arc::new(MockDocumentAnalyzer),
            Arc::new(MockInsightGenerator),
        ))
    });

    let first = handle.resolve().await.pipeline.clone();
    let second = handle.resolve().await.pipeline.clone();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(handle.resolve().await.mode, ServiceMode::Live);
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}
