//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - The upload route that relays a PDF by email
//! - Liveness and diagnostic routes
//! - JSON response and error types

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use printrelay_mail::PrintRelay;
use printrelay_shared::ServerConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Relay service wrapping the configured mail transport.
    pub relay: Arc<PrintRelay>,
}

impl AppState {
    /// Creates the state around a relay.
    #[must_use]
    pub fn new(relay: PrintRelay) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}

/// Creates the main application router.
///
/// CORS is wide open so a separately hosted frontend can post uploads; restrict
/// `allow_origin` before exposing this beyond development.
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let mut router = routes::api_routes();
    if server.diagnostics_enabled {
        router = router.merge(routes::diagnostics::routes());
    }

    router
        .layer(DefaultBodyLimit::max(server.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
