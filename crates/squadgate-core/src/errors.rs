use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Error returned by HTTP handlers and middleware.
///
/// Pairs the status code sent to the client with the error whose `Display`
/// output becomes the `error` field of the JSON body. Messages end up in
/// responses verbatim, so they must never carry tokens or secrets.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    fn with_message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, anyhow!(message.into()))
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::BAD_REQUEST, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::NOT_FOUND, message)
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::PAYLOAD_TOO_LARGE, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::BAD_GATEWAY, message)
    }

    pub fn gateway_timeout(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::GATEWAY_TIMEOUT, message)
    }

    /// The client-facing message.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status.as_u16(), self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Internal details stay in the logs
        let message = if self.status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = ?self.error, "internal error");
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        let body = Json(json!({
            "error": message
        }));

        (self.status, body).into_response()
    }
}
