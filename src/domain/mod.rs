mod analysis;
mod document;
mod insight;
mod session;

pub use analysis::{AnalysisResult, AnalysisStatistics};
pub use document::{ContentType, UploadedDocument};
pub use insight::Insight;
pub use session::{DocumentSession, SessionError, SessionId, SessionPhase, UploadSummary};
