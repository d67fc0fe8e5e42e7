//! Login/logout/check routes.
//!
//! Login verifies the single shared admin password and issues an opaque
//! session token, returned both as the `X-Session-Id` response header and an
//! HttpOnly cookie so browser and script clients can each hold on to it.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::app::AppState;
use crate::auth::{extract_session_id, SESSION_COOKIE, SESSION_HEADER};
use crate::http::ErrorBody;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct CheckResponse {
    pub authenticated: bool,
    pub message: String,
}

/// POST /auth/login — verify the shared password and open a session.
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<MessageResponse>), (StatusCode, Json<ErrorBody>)> {
    if req.password != state.config.auth.admin_password {
        warn!("login rejected: wrong password");
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorBody {
                error: "wrong password".to_string(),
            }),
        ));
    }

    let token = state.sessions.issue();

    let mut headers = HeaderMap::new();
    // uuid-derived tokens are always valid header values
    headers.insert(
        SESSION_HEADER,
        HeaderValue::from_str(&token).expect("token is ascii"),
    );
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&session_cookie(&token, state.config.gateway.production))
            .expect("cookie is ascii"),
    );

    Ok((
        headers,
        Json(MessageResponse {
            message: "login successful".to_string(),
        }),
    ))
}

/// POST /auth/logout — revoke the presented token and clear the cookie.
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> (HeaderMap, Json<MessageResponse>) {
    if let Some(token) = extract_session_id(&headers) {
        if state.sessions.revoke(&token) {
            info!("session revoked");
        }
    }

    let mut out = HeaderMap::new();
    out.insert(
        header::SET_COOKIE,
        HeaderValue::from_static(CLEAR_COOKIE),
    );
    (
        out,
        Json(MessageResponse {
            message: "logged out".to_string(),
        }),
    )
}

/// GET /auth/check — report whether the presented token is still live.
pub async fn check_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<CheckResponse> {
    let authenticated = extract_session_id(&headers)
        .map(|token| state.sessions.validate(&token))
        .unwrap_or(false);
    let message = if authenticated {
        "logged in"
    } else {
        "login required"
    };
    Json(CheckResponse {
        authenticated,
        message: message.to_string(),
    })
}

const CLEAR_COOKIE: &str = "session_id=; Path=/; HttpOnly; Max-Age=0";

fn session_cookie(token: &str, production: bool) -> String {
    if production {
        format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; Secure; SameSite=Strict")
    } else {
        format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
    }
}
