//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use printrelay_shared::AppError;
use serde::Serialize;

/// Error body returned by every route.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine readable error code.
    pub error: &'static str,
    /// Human readable detail.
    pub detail: String,
}

/// Success body returned by every route.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    /// Human readable confirmation.
    pub message: &'static str,
}

/// Wraps [`AppError`] so handlers can use `?`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl<E> From<E> for ApiError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorBody {
            error: self.0.error_code(),
            detail: self.0.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Shorthand for a 200 with a message body.
pub fn message(text: &'static str) -> (StatusCode, Json<MessageBody>) {
    (StatusCode::OK, Json(MessageBody { message: text }))
}
