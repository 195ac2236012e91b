use std::time::Duration;

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

use crate::domain::SessionId;

pub const SESSION_COOKIE: &str = "docinsight_session";

/// Extracts the session id from the `Cookie` header, ignoring malformed values.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::parse(value.trim()))
}

/// `Set-Cookie` value whose lifetime matches the server-side idle timeout.
pub fn session_cookie(id: SessionId, max_age: Duration) -> String {
    format!(
        "{SESSION_COOKIE}={id}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        max_age.as_secs()
    )
}
