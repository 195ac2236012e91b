use async_trait::async_trait;

use crate::domain::{AnalysisResult, UploadedDocument};

#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        document: &UploadedDocument,
    ) -> Result<AnalysisResult, DocumentAnalyzerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentAnalyzerError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("document analysis failed: {0}")]
    AnalysisFailed(String),
    #[error("document analysis timed out after {0}s")]
    Timeout(u64),
}
