use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::Serialize;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by the server's request-level errors. Feature crates keep
/// their own `thiserror` enums and stay unaware of axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

/// JSON error payload: `{"error": "...", "type": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(rename = "type")]
    pub error_type: String,
}

/// Render an [`HttpError`] as a JSON response
///
/// Server-side failures are logged with their full diagnostic text; the body
/// only carries the client message.
pub fn error_response<E: HttpError>(err: &E) -> Response {
    let status = err.status_code();

    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), error = %err, "request failed");
    } else {
        tracing::debug!(status = status.as_u16(), error = %err, "request rejected");
    }

    let body = ErrorBody {
        error: err.client_message(),
        error_type: err.error_type().to_owned(),
    };

    (status, Json(body)).into_response()
}
