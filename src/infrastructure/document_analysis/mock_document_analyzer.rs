use std::collections::BTreeMap;

use crate::application::ports::{DocumentAnalyzer, DocumentAnalyzerError};
use crate::domain::{AnalysisResult, AnalysisStatistics, UploadedDocument};

/// Offline stand-in for Document Intelligence. Output depends only on the
/// file name.
pub struct MockDocumentAnalyzer;

#[async_trait::async_trait]
impl DocumentAnalyzer for MockDocumentAnalyzer {
    async fn analyze(
        &self,
        document: &UploadedDocument,
    ) -> Result<AnalysisResult, DocumentAnalyzerError> {
        let content = format!("[Mock] Content from {}...", document.filename);

        let mut key_value_pairs = BTreeMap::new();
        key_value_pairs.insert("Document Type".to_string(), "Sample".to_string());
        key_value_pairs.insert("Status".to_string(), "Mock Data".to_string());

        Ok(AnalysisResult {
            content_preview: content.clone(),
            content,
            statistics: AnalysisStatistics {
                pages: 1,
                tables: 0,
                paragraphs: 5,
                confidence: "95.5%".to_string(),
            },
            languages: vec!["en".to_string()],
            key_value_pairs,
        })
    }
}
