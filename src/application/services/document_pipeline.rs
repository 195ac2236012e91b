use std::sync::Arc;

use crate::application::ports::{
    DocumentAnalyzer, DocumentAnalyzerError, InsightGenerator, InsightGeneratorError,
};
use crate::domain::{
    AnalysisResult, DocumentSession, Insight, SessionError, UploadSummary, UploadedDocument,
};

/// Sequential analyze-then-summarize workflow over one session context.
pub struct DocumentPipeline {
    analyzer: Arc<dyn DocumentAnalyzer>,
    insight_generator: Arc<dyn InsightGenerator>,
}

impl DocumentPipeline {
    pub fn new(
        analyzer: Arc<dyn DocumentAnalyzer>,
        insight_generator: Arc<dyn InsightGenerator>,
    ) -> Self {
        Self {
            analyzer,
            insight_generator,
        }
    }

    /// Records the upload in the session and runs document analysis.
    ///
    /// A failed analysis leaves the session in the `Failed` phase with no
    /// stored analysis, so insight generation stays locked.
    #[tracing::instrument(
        skip(self, session, document),
        fields(session_id = %session.id, filename = %document.filename)
    )]
    pub async fn analyze<'s>(
        &self,
        session: &'s mut DocumentSession,
        document: &UploadedDocument,
    ) -> Result<&'s AnalysisResult, PipelineError> {
        session.record_upload(UploadSummary {
            filename: document.filename.clone(),
            size_bytes: document.size_bytes(),
        });
        session.start_analysis()?;

        match self.analyzer.analyze(document).await {
            Ok(analysis) => {
                tracing::info!(
                    pages = analysis.statistics.pages,
                    content_chars = analysis.content.len(),
                    "Document analysis completed"
                );
                session.complete_analysis(analysis)?;
                session.analysis().ok_or(PipelineError::MissingAnalysis)
            }
            Err(e) => {
                tracing::error!(error = %e, "Document analysis failed");
                session.fail()?;
                Err(PipelineError::Analysis(e))
            }
        }
    }

    /// Generates insights from the analysis stored in the session.
    ///
    /// The generator is never called unless the session holds an analysis
    /// with non-empty content.
    #[tracing::instrument(skip(self, session), fields(session_id = %session.id))]
    pub async fn summarize<'s>(
        &self,
        session: &'s mut DocumentSession,
    ) -> Result<&'s Insight, PipelineError> {
        session.start_insight()?;

        let content = match session.analysis() {
            Some(analysis) => analysis.content.clone(),
            None => return Err(PipelineError::MissingAnalysis),
        };

        match self.insight_generator.generate(&content).await {
            Ok(insight) => {
                tracing::info!(
                    markdown_chars = insight.markdown.len(),
                    "Insight generation completed"
                );
                session.complete_insight(insight)?;
                session.insight().ok_or(PipelineError::MissingAnalysis)
            }
            Err(e) => {
                tracing::error!(error = %e, "Insight generation failed");
                session.fail()?;
                Err(PipelineError::Insight(e))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("analysis error: {0}")]
    Analysis(#[from] DocumentAnalyzerError),
    #[error("insight error: {0}")]
    Insight(#[from] InsightGeneratorError),
    #[error("upload and analyze a document first")]
    MissingAnalysis,
    #[error("session error: {0}")]
    Session(SessionError),
}

impl From<SessionError> for PipelineError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::MissingAnalysis => PipelineError::MissingAnalysis,
            other => PipelineError::Session(other),
        }
    }
}
