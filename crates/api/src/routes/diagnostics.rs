//! Operator-only diagnostics.
//!
//! `GET /test-email` pushes a canned message through the configured transport so an
//! operator can check credentials without submitting a real print job. It is mounted
//! only when `server.diagnostics_enabled` is set.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use tracing::info;

use crate::AppState;
use crate::error::{ApiError, MessageBody, message};

/// Sends the probe message.
async fn test_email(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<MessageBody>), ApiError> {
    info!(transport = state.relay.transport_name(), "Sending probe email");
    state.relay.send_probe().await?;
    Ok(message("Test email sent successfully!"))
}

/// Creates diagnostic routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/test-email", get(test_email))
}
