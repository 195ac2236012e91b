use std::time::Duration;

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};

use docinsight::domain::SessionId;
use docinsight::presentation::handlers::{SESSION_COOKIE, session_cookie, session_id_from_headers};

fn headers_with_cookie(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
    headers
}

#[test]
fn given_issued_cookie_when_sent_back_then_resolves_same_session() {
    let id = SessionId::new();
    let set_cookie = session_cookie(id, Duration::from_secs(1800));
    let pair = set_cookie.split(';').next().unwrap();

    let headers = headers_with_cookie(&format!("theme=dark; {pair}"));

    assert_eq!(session_id_from_headers(&headers), Some(id));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Max-Age=1800"));
}

#[test]
fn given_malformed_session_value_when_reading_then_returns_none() {
    let headers = headers_with_cookie(&format!("{SESSION_COOKIE}=not-a-uuid"));

    assert_eq!(session_id_from_headers(&headers), None);
    assert_eq!(session_id_from_headers(&HeaderMap::new()), None);
}
