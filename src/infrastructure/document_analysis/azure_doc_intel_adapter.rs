use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::Deserialize;
use serde::de::IgnoredAny;

use crate::application::ports::{DocumentAnalyzer, DocumentAnalyzerError};
use crate::domain::{AnalysisResult, AnalysisStatistics, UploadedDocument};

pub const API_VERSION: &str = "2024-11-30";
pub const MODEL_ID: &str = "prebuilt-layout";

/// Fixed-interval polling of the analyze operation, bounded by a deadline.
#[derive(Debug, Clone, Copy)]
pub struct PollingConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            timeout: Duration::from_secs(120),
        }
    }
}

pub struct AzureDocIntelAdapter {
    client: Client,
    endpoint: String,
    api_key: String,
    polling: PollingConfig,
}

impl AzureDocIntelAdapter {
    pub fn new(client: Client, endpoint: &str, api_key: &str, polling: PollingConfig) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            polling,
        }
    }

    fn analyze_url(&self) -> String {
        format!(
            "{}/documentintelligence/documentModels/{}:analyze?api-version={}&features=languages,keyValuePairs",
            self.endpoint, MODEL_ID, API_VERSION
        )
    }

    async fn submit(&self, data: &[u8]) -> Result<String, DocumentAnalyzerError> {
        let body = serde_json::json!({ "base64Source": general_purpose::STANDARD.encode(data) });

        let response = self
            .client
            .post(self.analyze_url())
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DocumentAnalyzerError::ApiRequestFailed(format!("Azure submit failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(DocumentAnalyzerError::ApiRequestFailed(format!(
                "Azure submit returned {status}: {text}"
            )));
        }

        response
            .headers()
            .get("Operation-Location")
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .ok_or_else(|| {
                DocumentAnalyzerError::InvalidResponse(
                    "Azure response missing Operation-Location header".to_string(),
                )
            })
    }

    async fn poll_until_complete(
        &self,
        operation_url: &str,
    ) -> Result<AnalyzeResult, DocumentAnalyzerError> {
        let poll_future = async {
            loop {
                let response = self
                    .client
                    .get(operation_url)
                    .header("Ocp-Apim-Subscription-Key", &self.api_key)
                    .send()
                    .await
                    .map_err(|e| {
                        DocumentAnalyzerError::ApiRequestFailed(format!(
                            "Azure poll request failed: {e}"
                        ))
                    })?;

                if !response.status().is_success() {
                    let status = response.status();
                    let text = response.text().await.unwrap_or_default();
                    return Err(DocumentAnalyzerError::ApiRequestFailed(format!(
                        "Azure poll returned {status}: {text}"
                    )));
                }

                let result: AnalyzeResponse = response.json().await.map_err(|e| {
                    DocumentAnalyzerError::InvalidResponse(format!(
                        "Azure response parse failed: {e}"
                    ))
                })?;

                match result.status.as_str() {
                    "succeeded" => {
                        return result.analyze_result.ok_or_else(|| {
                            DocumentAnalyzerError::InvalidResponse(
                                "succeeded operation carries no analyzeResult".to_string(),
                            )
                        });
                    }
                    "failed" => {
                        let reason = result
                            .error
                            .map(|e| format!("{}: {}", e.code, e.message))
                            .unwrap_or_else(|| "no error details".to_string());
                        return Err(DocumentAnalyzerError::AnalysisFailed(reason));
                    }
                    status => {
                        tracing::debug!(status, "Analysis still running");
                        tokio::time::sleep(self.polling.interval).await;
                    }
                }
            }
        };

        tokio::time::timeout(self.polling.timeout, poll_future)
            .await
            .map_err(|_| DocumentAnalyzerError::Timeout(self.polling.timeout.as_secs()))?
    }
}

#[async_trait]
impl DocumentAnalyzer for AzureDocIntelAdapter {
    #[tracing::instrument(
        skip(self, document),
        fields(
            filename = %document.filename,
            content_type = document.content_type.as_mime(),
            bytes = document.data.len()
        )
    )]
    async fn analyze(
        &self,
        document: &UploadedDocument,
    ) -> Result<AnalysisResult, DocumentAnalyzerError> {
        let operation_url = self.submit(&document.data).await?;
        tracing::debug!(operation_url = %operation_url, "Analysis submitted");

        let result = self.poll_until_complete(&operation_url).await?;
        Ok(result.into_analysis())
    }
}

#[derive(Deserialize)]
pub struct AnalyzeResponse {
    pub status: String,
    #[serde(rename = "analyzeResult")]
    pub analyze_result: Option<AnalyzeResult>,
    pub error: Option<AnalyzeError>,
}

#[derive(Deserialize)]
pub struct AnalyzeError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub tables: Vec<IgnoredAny>,
    #[serde(default)]
    pub paragraphs: Vec<IgnoredAny>,
    #[serde(default)]
    pub languages: Vec<DetectedLanguage>,
    #[serde(default)]
    pub key_value_pairs: Vec<KeyValuePair>,
}

#[derive(Deserialize)]
pub struct Page {
    #[serde(default)]
    pub words: Vec<Word>,
}

#[derive(Deserialize)]
pub struct Word {
    pub confidence: f64,
}

#[derive(Deserialize)]
pub struct DetectedLanguage {
    pub locale: String,
}

#[derive(Deserialize)]
pub struct KeyValuePair {
    pub key: KeyValueElement,
    pub value: Option<KeyValueElement>,
}

#[derive(Deserialize)]
pub struct KeyValueElement {
    #[serde(default)]
    pub content: String,
}

impl AnalyzeResult {
    /// Mean word confidence across all pages, if any words were read.
    pub fn mean_word_confidence(&self) -> Option<f64> {
        let (sum, count) = self
            .pages
            .iter()
            .flat_map(|page| page.words.iter())
            .fold((0.0, 0usize), |(sum, count), word| {
                (sum + word.confidence, count + 1)
            });

        (count > 0).then(|| sum / count as f64)
    }

    pub fn into_analysis(self) -> AnalysisResult {
        let confidence = AnalysisStatistics::confidence_label(self.mean_word_confidence());

        let mut languages: Vec<String> = Vec::new();
        for language in &self.languages {
            if !languages.contains(&language.locale) {
                languages.push(language.locale.clone());
            }
        }

        let key_value_pairs: BTreeMap<String, String> = self
            .key_value_pairs
            .into_iter()
            .filter(|pair| !pair.key.content.trim().is_empty())
            .map(|pair| {
                let value = pair.value.map(|v| v.content).unwrap_or_default();
                (pair.key.content, value)
            })
            .collect();

        AnalysisResult {
            content_preview: AnalysisResult::preview_of(&self.content),
            statistics: AnalysisStatistics {
                pages: self.pages.len(),
                tables: self.tables.len(),
                paragraphs: self.paragraphs.len(),
                confidence,
            },
            content: self.content,
            languages,
            key_value_pairs,
        }
    }
}
