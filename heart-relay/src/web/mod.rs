//! Web server module.
//!
//! This module exposes the relay over HTTP:
//! - `/.netlify/functions/save-response` and `/api/save-response` feed the relay
//! - `/health` reports liveness and whether email is configured

pub mod handlers;

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{health, save_response, AppState, HealthResponse};

/// Paths that route to the relay.
pub const SAVE_RESPONSE_PATHS: &[&str] = &["/.netlify/functions/save-response", "/api/save-response"];

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let mut app = Router::new().route("/health", get(health));

    for path in SAVE_RESPONSE_PATHS {
        app = app.route(path, any(save_response));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}
