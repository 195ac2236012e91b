pub mod cloud;
pub mod document_analysis;
pub mod llm;
pub mod observability;
pub mod persistence;
pub mod proxy;
