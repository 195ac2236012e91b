use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::application::ports::SessionStore;
use crate::domain::{DocumentSession, SessionId};

pub const DEFAULT_SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);
pub const DEFAULT_MAX_SESSIONS: usize = 1_000;

struct StoredSession {
    session: DocumentSession,
    touched: Instant,
}

/// Process-local session map.
///
/// A session untouched for longer than the idle timeout is gone. Expired
/// entries are swept on every save, and when the map is full the least
/// recently touched session is evicted to make room.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, StoredSession>>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_SESSION_IDLE_TIMEOUT, DEFAULT_MAX_SESSIONS)
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn is_expired(&self, stored: &StoredSession, now: Instant) -> bool {
        now.duration_since(stored.touched) > self.idle_timeout
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: SessionId) -> Option<DocumentSession> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        match sessions.get_mut(&id) {
            Some(stored) if !self.is_expired(stored, now) => {
                stored.touched = now;
                Some(stored.session.clone())
            }
            Some(_) => {
                sessions.remove(&id);
                tracing::debug!(session_id = %id, "Session expired");
                None
            }
            None => None,
        }
    }

    async fn save(&self, session: DocumentSession) {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, stored| !self.is_expired(stored, now));
        let expired = before - sessions.len();
        if expired > 0 {
            tracing::debug!(expired, "Swept idle sessions");
        }

        if !sessions.contains_key(&session.id) && sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, stored)| stored.touched)
                .map(|(id, _)| *id);
            if let Some(oldest) = oldest {
                sessions.remove(&oldest);
                tracing::debug!(session_id = %oldest, "Evicted least recently used session");
            }
        }

        sessions.insert(
            session.id,
            StoredSession {
                session,
                touched: now,
            },
        );
    }
}
