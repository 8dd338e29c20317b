//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod diagnostics;
pub mod health;
pub mod upload;

/// Creates the public API router.
///
/// The diagnostic routes are not included; see [`crate::create_router`].
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(health::routes()).merge(upload::routes())
}
