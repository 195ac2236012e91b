use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Url};
use tokio::sync::OnceCell;

use crate::application::ports::{DocumentAnalyzer, InsightGenerator};
use crate::application::services::DocumentPipeline;
use crate::infrastructure::document_analysis::{
    AzureDocIntelAdapter, MockDocumentAnalyzer, PollingConfig,
};
use crate::infrastructure::llm::{
    AzureOpenAiDeployment, AzureOpenAiInsightClient, MockInsightGenerator,
};
use crate::presentation::config::{DemoSettings, HttpSettings};

#[derive(Debug, thiserror::Error)]
pub enum CloudServicesError {
    #[error("mock mode forced by configuration")]
    MockModeForced,
    #[error("{0} is not configured")]
    MissingSetting(&'static str),
    #[error("invalid {name} endpoint: {reason}")]
    InvalidEndpoint { name: &'static str, reason: String },
    #[error("http client initialization failed: {0}")]
    ClientInit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceMode {
    Live,
    Mock,
}

/// Initialized Azure document analysis and insight clients.
pub struct CloudServices {
    analyzer: Arc<dyn DocumentAnalyzer>,
    insight_generator: Arc<dyn InsightGenerator>,
}

impl CloudServices {
    pub fn from_parts(
        analyzer: Arc<dyn DocumentAnalyzer>,
        insight_generator: Arc<dyn InsightGenerator>,
    ) -> Self {
        Self {
            analyzer,
            insight_generator,
        }
    }

    pub fn connect(demo: &DemoSettings, http: &HttpSettings) -> Result<Self, CloudServicesError> {
        if demo.mock_mode {
            return Err(CloudServicesError::MockModeForced);
        }

        let doc_intel_endpoint = required(&demo.doc_intel_endpoint, "AZURE_DOC_INTEL_ENDPOINT")?;
        let doc_intel_key = required(&demo.doc_intel_key, "AZURE_DOC_INTEL_KEY")?;
        let openai_endpoint = required(&demo.openai_endpoint, "AZURE_OPENAI_ENDPOINT")?;
        let openai_key = required(&demo.openai_key, "AZURE_OPENAI_KEY")?;

        validate_endpoint(doc_intel_endpoint, "document intelligence")?;
        validate_endpoint(openai_endpoint, "openai")?;

        let client = Client::builder()
            .timeout(http.timeout())
            .build()
            .map_err(|e| CloudServicesError::ClientInit(e.to_string()))?;

        let polling = PollingConfig {
            interval: Duration::from_millis(demo.poll_interval_ms),
            timeout: Duration::from_secs(demo.poll_timeout_secs),
        };
        let analyzer = AzureDocIntelAdapter::new(
            client.clone(),
            doc_intel_endpoint,
            doc_intel_key,
            polling,
        );

        let deployment = AzureOpenAiDeployment {
            endpoint: openai_endpoint.to_string(),
            deployment: demo.openai_deployment.clone(),
            api_version: demo.openai_api_version.clone(),
            max_tokens: demo.insight_max_tokens,
            max_prompt_chars: demo.max_prompt_chars,
        };
        let insight_generator = AzureOpenAiInsightClient::new(client, &deployment, openai_key);

        Ok(Self::from_parts(
            Arc::new(analyzer),
            Arc::new(insight_generator),
        ))
    }
}

fn required<'a>(
    value: &'a Option<String>,
    name: &'static str,
) -> Result<&'a str, CloudServicesError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(CloudServicesError::MissingSetting(name))
}

fn validate_endpoint(endpoint: &str, name: &'static str) -> Result<(), CloudServicesError> {
    Url::parse(endpoint)
        .map(|_| ())
        .map_err(|e| CloudServicesError::InvalidEndpoint {
            name,
            reason: e.to_string(),
        })
}

/// Outcome of the one-time initialization attempt.
pub struct ResolvedServices {
    pub pipeline: Arc<DocumentPipeline>,
    pub mode: ServiceMode,
    pub unavailable_reason: Option<String>,
}

impl ResolvedServices {
    fn live(services: CloudServices) -> Self {
        Self {
            pipeline: Arc::new(DocumentPipeline::new(
                services.analyzer,
                services.insight_generator,
            )),
            mode: ServiceMode::Live,
            unavailable_reason: None,
        }
    }

    fn mock(reason: String) -> Self {
        Self {
            pipeline: Arc::new(DocumentPipeline::new(
                Arc::new(MockDocumentAnalyzer),
                Arc::new(MockInsightGenerator),
            )),
            mode: ServiceMode::Mock,
            unavailable_reason: Some(reason),
        }
    }
}

type Connector = Box<dyn Fn() -> Result<CloudServices, CloudServicesError> + Send + Sync>;

/// Lazily constructed, process-lifetime handle to the cloud services.
///
/// Construction runs at most once. A failure is logged once and kept as a
/// permanent mock-mode state instead of being retried per request.
pub struct CloudServicesHandle {
    cell: OnceCell<ResolvedServices>,
    connect: Connector,
}

impl CloudServicesHandle {
    pub fn new(demo: DemoSettings, http: HttpSettings) -> Self {
        Self::with_connector(move || CloudServices::connect(&demo, &http))
    }

    pub fn with_connector<F>(connect: F) -> Self
    where
        F: Fn() -> Result<CloudServices, CloudServicesError> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            connect: Box::new(connect),
        }
    }

    pub async fn resolve(&self) -> &ResolvedServices {
        self.cell
            .get_or_init(|| async {
                match (self.connect)() {
                    Ok(services) => {
                        tracing::info!("Cloud services initialized");
                        ResolvedServices::live(services)
                    }
                    Err(e) => {
                        tracing::warn!(reason = %e, "Cloud services unavailable, using mock data");
                        ResolvedServices::mock(e.to_string())
                    }
                }
            })
            .await
    }
}
