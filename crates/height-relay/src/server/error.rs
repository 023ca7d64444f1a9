use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use height_relay_core::CoreError;

// ==============================================================================
// Error Type
// ==============================================================================

/// Client input errors are answered in plain text; everything else is a
/// JSON `{"message": ...}` body.
#[derive(Debug)]
pub(crate) enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            Self::NotFound(msg) => message_response(StatusCode::NOT_FOUND, msg),
            Self::Internal(msg) => message_response(StatusCode::INTERNAL_SERVER_ERROR, msg),
        }
    }
}

fn message_response(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "message": message }))).into_response()
}

/// Log the underlying failure and hide it behind a generic client message.
pub(super) fn internal_error(err: CoreError, message: &str) -> AppError {
    tracing::error!(error = %err, "{message}");
    AppError::Internal(message.to_owned())
}
