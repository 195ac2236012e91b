use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::SessionStore;
use crate::infrastructure::cloud::CloudServicesHandle;
use crate::presentation::views::PageRenderer;

#[derive(Clone)]
pub struct DemoState {
    pub cloud: Arc<CloudServicesHandle>,
    pub sessions: Arc<dyn SessionStore>,
    pub renderer: Arc<PageRenderer>,
    pub max_upload_bytes: usize,
    /// Idle lifetime shared by the store and the session cookie.
    pub session_ttl: Duration,
}
