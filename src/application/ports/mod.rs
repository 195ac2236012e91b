mod cloud_proxy;
mod document_analyzer;
mod insight_generator;
mod session_store;

pub use cloud_proxy::{CloudProxy, ProxyError};
pub use document_analyzer::{DocumentAnalyzer, DocumentAnalyzerError};
pub use insight_generator::{InsightGenerator, InsightGeneratorError};
pub use session_store::SessionStore;
