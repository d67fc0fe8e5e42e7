use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;

use crate::app::AppState;
use crate::http::ErrorBody;

/// Request/response header carrying the session token.
pub const SESSION_HEADER: &str = "x-session-id";
/// Cookie fallback for browser clients.
pub const SESSION_COOKIE: &str = "session_id";

/// Pull the session token from the `X-Session-Id` header, falling back to
/// the `session_id` cookie.
pub fn extract_session_id(headers: &HeaderMap) -> Option<String> {
    if let Some(v) = headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok()) {
        if !v.is_empty() {
            return Some(v.to_string());
        }
    }
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| cookie_value(cookies, SESSION_COOKIE))
}

/// Find `name=value` in a `Cookie` header.
fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k == name && !v.is_empty()).then(|| v.to_string())
    })
}

/// Gate for admin-only routes: 401 unless a live session token is presented.
pub fn require_admin(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(), (StatusCode, Json<ErrorBody>)> {
    let authorized = extract_session_id(headers)
        .map(|token| state.sessions.validate(&token))
        .unwrap_or(false);
    if authorized {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorBody {
                error: "Login required. Send the X-Session-Id header from /auth/login.".to_string(),
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn header_takes_precedence_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_static("tok-header"));
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("session_id=tok-cookie"),
        );
        assert_eq!(extract_session_id(&headers).as_deref(), Some("tok-header"));
    }

    #[test]
    fn cookie_is_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session_id=tok-1; lang=en"),
        );
        assert_eq!(extract_session_id(&headers).as_deref(), Some("tok-1"));
    }

    #[test]
    fn missing_and_empty_tokens_yield_none() {
        let headers = HeaderMap::new();
        assert_eq!(extract_session_id(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_static(""));
        headers.insert(header::COOKIE, HeaderValue::from_static("session_id="));
        assert_eq!(extract_session_id(&headers), None);
    }
}
