use std::fmt;

use uuid::Uuid;

use super::analysis::AnalysisResult;
use super::insight::Insight;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value).ok().map(Self)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    FileUploaded,
    AnalysisInProgress,
    AnalysisComplete,
    InsightInProgress,
    InsightComplete,
    Failed,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::FileUploaded => "file_uploaded",
            SessionPhase::AnalysisInProgress => "analysis_in_progress",
            SessionPhase::AnalysisComplete => "analysis_complete",
            SessionPhase::InsightInProgress => "insight_in_progress",
            SessionPhase::InsightComplete => "insight_complete",
            SessionPhase::Failed => "failed",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    pub filename: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("cannot {action} while session is {phase}")]
    InvalidTransition {
        phase: SessionPhase,
        action: &'static str,
    },
    #[error("no analysed document with content in this session")]
    MissingAnalysis,
}

/// Per-session context carried from the analysis step to the insight step.
///
/// Uploading a new document overwrites whatever the session held before.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSession {
    pub id: SessionId,
    phase: SessionPhase,
    upload: Option<UploadSummary>,
    analysis: Option<AnalysisResult>,
    insight: Option<Insight>,
}

impl DocumentSession {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            phase: SessionPhase::Idle,
            upload: None,
            analysis: None,
            insight: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn upload(&self) -> Option<&UploadSummary> {
        self.upload.as_ref()
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn insight(&self) -> Option<&Insight> {
        self.insight.as_ref()
    }

    /// True when an analysis with non-empty content is stored.
    pub fn is_ready_for_insight(&self) -> bool {
        self.analysis.as_ref().is_some_and(AnalysisResult::has_content)
    }

    pub fn record_upload(&mut self, upload: UploadSummary) {
        self.upload = Some(upload);
        self.analysis = None;
        self.insight = None;
        self.phase = SessionPhase::FileUploaded;
    }

    pub fn start_analysis(&mut self) -> Result<(), SessionError> {
        self.transition(
            &[SessionPhase::FileUploaded],
            SessionPhase::AnalysisInProgress,
            "start analysis",
        )
    }

    pub fn complete_analysis(&mut self, analysis: AnalysisResult) -> Result<(), SessionError> {
        self.transition(
            &[SessionPhase::AnalysisInProgress],
            SessionPhase::AnalysisComplete,
            "complete analysis",
        )?;
        self.analysis = Some(analysis);
        Ok(())
    }

    pub fn start_insight(&mut self) -> Result<(), SessionError> {
        if !self.is_ready_for_insight() {
            return Err(SessionError::MissingAnalysis);
        }
        self.transition(
            &[
                SessionPhase::AnalysisComplete,
                SessionPhase::InsightComplete,
                SessionPhase::Failed,
            ],
            SessionPhase::InsightInProgress,
            "start insight generation",
        )?;
        self.insight = None;
        Ok(())
    }

    pub fn complete_insight(&mut self, insight: Insight) -> Result<(), SessionError> {
        self.transition(
            &[SessionPhase::InsightInProgress],
            SessionPhase::InsightComplete,
            "complete insight generation",
        )?;
        self.insight = Some(insight);
        Ok(())
    }

    /// Marks the in-flight step as failed. Stored analysis survives an
    /// insight failure so the summary can be requested again.
    pub fn fail(&mut self) -> Result<(), SessionError> {
        self.transition(
            &[
                SessionPhase::AnalysisInProgress,
                SessionPhase::InsightInProgress,
            ],
            SessionPhase::Failed,
            "record a failure",
        )
    }

    fn transition(
        &mut self,
        allowed_from: &[SessionPhase],
        to: SessionPhase,
        action: &'static str,
    ) -> Result<(), SessionError> {
        if !allowed_from.contains(&self.phase) {
            return Err(SessionError::InvalidTransition {
                phase: self.phase,
                action,
            });
        }
        self.phase = to;
        Ok(())
    }
}
