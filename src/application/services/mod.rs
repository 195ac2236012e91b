mod document_pipeline;

pub use document_pipeline::{DocumentPipeline, PipelineError};
