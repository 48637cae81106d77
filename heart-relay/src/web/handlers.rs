//! HTTP endpoint handlers.
//!
//! The relay endpoint accepts every method and leaves dispatch to
//! [`Relay::handle`], so unsupported methods get the relay's own 405.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::relay::{HandlerResponse, InboundEvent, Relay};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

impl AppState {
    pub fn new(relay: Relay) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> Response {
        (self.status_code, self.body).into_response()
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub email_configured: bool,
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        email_configured: state.relay.is_configured(),
    })
}

// =============================================================================
// Save Response
// =============================================================================

/// Tile event endpoint.
pub async fn save_response(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> HandlerResponse {
    let body = if body.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(&body).into_owned())
    };

    let event = InboundEvent {
        method,
        headers,
        body,
    };

    let response = state.relay.handle(&event).await;

    info!(
        method = %event.method,
        status_code = response.status_code.as_u16(),
        "save_response_complete"
    );

    response
}
