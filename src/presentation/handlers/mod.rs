mod demo;
mod health;
mod proxy;
mod session_cookie;

pub use demo::{UPLOAD_FIELD, UploadRejection, index_handler, insights_handler, upload_handler};
pub use health::health_handler;
pub use proxy::{CognitiveParams, ErrorDetail, LlmParams, cognitive_handler, llm_handler};
pub use session_cookie::{SESSION_COOKIE, session_cookie, session_id_from_headers};
