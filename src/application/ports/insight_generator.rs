use async_trait::async_trait;

use crate::domain::Insight;

/// Turns extracted document text into a markdown summary.
///
/// Callers must not pass empty text.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate(&self, text: &str) -> Result<Insight, InsightGeneratorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum InsightGeneratorError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
