use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, patch, post},
    Router,
};
use rota_core::RotaConfig;
use rota_roster::{RosterEngine, ShiftStore};
use rota_sessions::SessionStore;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

/// Central shared state — passed as Arc<AppState> to all Axum handlers.
pub struct AppState {
    pub config: RotaConfig,
    pub store: Arc<ShiftStore>,
    pub engine: RosterEngine,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(
        config: RotaConfig,
        store: Arc<ShiftStore>,
        engine: RosterEngine,
        sessions: SessionStore,
    ) -> Self {
        Self {
            config,
            store,
            engine,
            sessions,
        }
    }
}

/// Assemble the full Axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = build_cors(&state.config);
    Router::new()
        .route("/health", get(crate::http::health::health_handler))
        .route("/auth/login", post(crate::http::auth::login_handler))
        .route("/auth/logout", post(crate::http::auth::logout_handler))
        .route("/auth/check", get(crate::http::auth::check_handler))
        .route(
            "/shifts",
            post(crate::http::shifts::create_handler).get(crate::http::shifts::list_handler),
        )
        .route(
            "/shifts/auto-generate",
            post(crate::http::shifts::auto_generate_handler),
        )
        .route(
            "/shifts/{date}/{work_type}",
            patch(crate::http::shifts::override_handler),
        )
        .with_state(state)
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Credentialed CORS for the admin frontend origins from config.
///
/// The session token travels back in `X-Session-Id`, so that header must be
/// both accepted on requests and exposed on responses.
fn build_cors(config: &RotaConfig) -> CorsLayer {
    let session_header = HeaderName::from_static(crate::auth::SESSION_HEADER);
    let origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE, session_header.clone()])
        .allow_credentials(true)
        .expose_headers([session_header])
}
