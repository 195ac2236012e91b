mod azure_doc_intel_adapter;
mod mock_document_analyzer;

pub use azure_doc_intel_adapter::{
    API_VERSION, AnalyzeResponse, AnalyzeResult, AzureDocIntelAdapter, MODEL_ID, PollingConfig,
};
pub use mock_document_analyzer::MockDocumentAnalyzer;
