use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::application::ports::{CloudProxy, ProxyError};
use crate::infrastructure::observability::sanitize_for_log;

pub const SENTIMENT_PATH: &str = "/text/analytics/v3.0/sentiment";
pub const COMPLETIONS_PATH: &str = "/completions";

#[derive(Debug, Clone, Default)]
pub struct ProxyTargets {
    pub completion_endpoint: String,
    pub completion_key: String,
    pub cognitive_endpoint: String,
    pub cognitive_key: String,
    pub max_tokens: u32,
}

/// Relays prompts to Azure OpenAI completions and text to Azure Language
/// sentiment analysis. Endpoints and keys are used as given; an empty
/// endpoint surfaces as a transport error on the first call.
pub struct AzureProxyClient {
    client: Client,
    targets: ProxyTargets,
}

impl AzureProxyClient {
    pub fn new(client: Client, targets: ProxyTargets) -> Self {
        Self { client, targets }
    }

    pub fn completion_body(&self, prompt: &str) -> Value {
        json!({ "prompt": prompt, "max_tokens": self.targets.max_tokens })
    }

    pub fn sentiment_body(text: &str) -> Value {
        json!({ "documents": [{ "id": "1", "language": "en", "text": text }] })
    }

    async fn forward(
        &self,
        url: String,
        key_header: &'static str,
        key: &str,
        body: &Value,
    ) -> Result<Value, ProxyError> {
        let response = self
            .client
            .post(url)
            .header(key_header, key)
            .json(body)
            .send()
            .await
            .map_err(|e| ProxyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProxyError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProxyError::InvalidBody(e.to_string()))
    }
}

fn join_url(endpoint: &str, path: &str) -> String {
    format!("{}{}", endpoint.trim_end_matches('/'), path)
}

#[async_trait]
impl CloudProxy for AzureProxyClient {
    #[tracing::instrument(skip(self, prompt))]
    async fn completion(&self, prompt: &str) -> Result<Value, ProxyError> {
        tracing::debug!(prompt = %sanitize_for_log(prompt), "Forwarding completion request");
        let url = join_url(&self.targets.completion_endpoint, COMPLETIONS_PATH);
        self.forward(
            url,
            "api-key",
            &self.targets.completion_key,
            &self.completion_body(prompt),
        )
        .await
    }

    #[tracing::instrument(skip(self, text))]
    async fn sentiment(&self, text: &str) -> Result<Value, ProxyError> {
        tracing::debug!(text = %sanitize_for_log(text), "Forwarding sentiment request");
        let url = join_url(&self.targets.cognitive_endpoint, SENTIMENT_PATH);
        self.forward(
            url,
            "Ocp-Apim-Subscription-Key",
            &self.targets.cognitive_key,
            &Self::sentiment_body(text),
        )
        .await
    }
}
