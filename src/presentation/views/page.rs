use serde::Serialize;

use crate::domain::{AnalysisResult, ContentType, DocumentSession, Insight, SessionPhase};
use crate::infrastructure::cloud::{ResolvedServices, ServiceMode};

use super::markdown::render_markdown;

pub const UPLOAD_FIRST_MESSAGE: &str = "Upload and analyze a document first to generate insights.";
const MOCK_ANALYSIS_NOTICE: &str =
    "Note: This is mock data. Configure Azure Document Intelligence for live analysis.";
const MOCK_INSIGHT_NOTICE: &str =
    "Note: This is mock data. Configure Azure OpenAI for live insights.";

/// Everything the page template needs for one render.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub live: bool,
    pub mode_label: String,
    pub unavailable_reason: Option<String>,
    pub accepted_extensions: String,
    pub upload: Option<UploadView>,
    pub upload_error: Option<String>,
    pub analysis: PanelView,
    pub insight: PanelView,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadView {
    pub filename: String,
    pub size_bytes: u64,
}

/// One result column. At most one of `body` and `error` is set; `notice`
/// is an informational line shown under either.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PanelView {
    pub body: Option<String>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl PanelView {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            notice: Some(message.into()),
            ..Self::default()
        }
    }

    /// Pretty-printed JSON; escaped by the template.
    pub fn analysis(analysis: &AnalysisResult) -> Self {
        match analysis.to_pretty_json() {
            Ok(json) => Self {
                body: Some(json),
                ..Self::default()
            },
            Err(e) => Self::error(format!("Could not display analysis: {e}")),
        }
    }

    /// Markdown rendered to HTML; inserted unescaped by the template.
    pub fn insight(insight: &Insight) -> Self {
        Self {
            body: Some(render_markdown(&insight.markdown)),
            ..Self::default()
        }
    }
}

impl PageView {
    pub fn new(services: &ResolvedServices) -> Self {
        let live = services.mode == ServiceMode::Live;
        Self {
            live,
            mode_label: if live {
                "LIVE - Azure AI services connected".to_string()
            } else {
                "LOCAL MODE - Using mock data".to_string()
            },
            unavailable_reason: services.unavailable_reason.clone(),
            accepted_extensions: ContentType::ACCEPTED_EXTENSIONS.join(", "),
            upload: None,
            upload_error: None,
            analysis: PanelView::default(),
            insight: PanelView::default(),
        }
    }

    /// Fills panels from what the session has stored.
    pub fn with_session(mut self, session: &DocumentSession) -> Self {
        self.upload = session.upload().map(|u| UploadView {
            filename: u.filename.clone(),
            size_bytes: u.size_bytes,
        });

        self.analysis = match session.analysis() {
            Some(analysis) => PanelView::analysis(analysis),
            None if session.phase() == SessionPhase::Failed => {
                PanelView::error("The last analysis failed. Upload the document again.")
            }
            None => PanelView::default(),
        };

        self.insight = match session.insight() {
            Some(insight) => PanelView::insight(insight),
            None if session.phase() == SessionPhase::Failed && session.is_ready_for_insight() => {
                PanelView::error("Insight generation failed. Regenerate insights to try again.")
            }
            None if session.upload().is_some() && !session.is_ready_for_insight() => {
                PanelView::notice(UPLOAD_FIRST_MESSAGE)
            }
            None => PanelView::default(),
        };

        self.with_mock_notices()
    }

    /// Adds the mock-data reminder under panels that show results.
    pub fn with_mock_notices(mut self) -> Self {
        if self.live {
            return self;
        }
        if self.analysis.body.is_some() {
            self.analysis.notice = Some(MOCK_ANALYSIS_NOTICE.to_string());
        }
        if self.insight.body.is_some() {
            self.insight.notice = Some(MOCK_INSIGHT_NOTICE.to_string());
        }
        self
    }
}
