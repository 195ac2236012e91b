use async_trait::async_trait;

use crate::domain::{DocumentSession, SessionId};

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, id: SessionId) -> Option<DocumentSession>;

    async fn save(&self, session: DocumentSession);
}
