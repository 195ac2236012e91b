mod in_memory_session_store;

pub use in_memory_session_store::{
    DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE_TIMEOUT, InMemorySessionStore,
};
