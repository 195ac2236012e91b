use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{InsightGenerator, InsightGeneratorError};
use crate::domain::Insight;
use crate::infrastructure::observability::sanitize_for_log;

pub const INSIGHT_SYSTEM_PROMPT: &str = "You are a document analyst. Summarize the document \
text supplied by the user as markdown with exactly these bold section headings: \
**Executive Summary**, **Key Points** (a bulleted list), **Document Type**, **Notes**, \
**Next Steps** (a numbered list). Base every statement on the supplied text only.";

pub struct AzureOpenAiInsightClient {
    client: Client,
    url: String,
    api_key: String,
    max_tokens: usize,
    max_prompt_chars: usize,
}

#[derive(Debug, Clone)]
pub struct AzureOpenAiDeployment {
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
    pub max_tokens: usize,
    pub max_prompt_chars: usize,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl AzureOpenAiInsightClient {
    pub fn new(client: Client, deployment: &AzureOpenAiDeployment, api_key: &str) -> Self {
        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            deployment.endpoint.trim_end_matches('/'),
            deployment.deployment,
            deployment.api_version,
        );
        Self {
            client,
            url,
            api_key: api_key.to_string(),
            max_tokens: deployment.max_tokens,
            max_prompt_chars: deployment.max_prompt_chars,
        }
    }

    fn build_messages(&self, text: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage {
                role: "system".to_string(),
                content: INSIGHT_SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: truncate_chars(text, self.max_prompt_chars).to_string(),
            },
        ]
    }
}

/// Cuts `text` to at most `max_chars` characters without splitting a char.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[async_trait]
impl InsightGenerator for AzureOpenAiInsightClient {
    #[tracing::instrument(skip(self, text), fields(text_chars = text.chars().count()))]
    async fn generate(&self, text: &str) -> Result<Insight, InsightGeneratorError> {
        tracing::debug!(text = %sanitize_for_log(text), "Requesting insight generation");

        let request_body = ChatCompletionRequest {
            messages: self.build_messages(text),
            max_tokens: self.max_tokens,
            temperature: 0.2,
        };

        let response = self
            .client
            .post(&self.url)
            .header("api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| InsightGeneratorError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(InsightGeneratorError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| InsightGeneratorError::InvalidResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| Insight::new(choice.message.content.trim()))
            .ok_or_else(|| InsightGeneratorError::InvalidResponse("empty choices".to_string()))
    }
}
