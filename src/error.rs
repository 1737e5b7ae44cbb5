//! Gateway request failures and their HTTP mapping.
//!
//! | Variant               | Status |
//! |-----------------------|--------|
//! | `MissingCredential`   | 401    |
//! | `Unauthenticated`     | 403    |
//! | `Forbidden`           | 403    |
//! | `NotFound`            | 404    |
//! | `PayloadTooLarge`     | 413    |
//! | `BadRequest`          | 400    |
//! | `UpstreamUnavailable` | 502    |
//! | `UpstreamTimeout`     | 504    |
//!
//! Upstream 5xx responses are not errors here; they are relayed as received.

use axum::response::{IntoResponse, Response};
use squadgate_auth::{AuthFailure, Role, TokenError};
use squadgate_config::UpstreamService;
use squadgate_core::AppError;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("missing bearer credential")]
    MissingCredential,

    #[error("token rejected ({})", .0.kind())]
    Unauthenticated(TokenError),

    #[error("role {actual} may not access a route requiring {required}")]
    Forbidden { actual: Role, required: Role },

    #[error("no route matches the request path")]
    NotFound,

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("malformed request: {0}")]
    BadRequest(String),

    #[error("upstream {upstream} unavailable: {reason}")]
    UpstreamUnavailable {
        upstream: UpstreamService,
        reason: String,
    },

    #[error("upstream {upstream} timed out")]
    UpstreamTimeout { upstream: UpstreamService },
}

impl GatewayError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::MissingCredential => "missing_credential",
            GatewayError::Unauthenticated(_) => "unauthenticated",
            GatewayError::Forbidden { .. } => "forbidden",
            GatewayError::NotFound => "not_found",
            GatewayError::PayloadTooLarge { .. } => "payload_too_large",
            GatewayError::BadRequest(_) => "bad_request",
            GatewayError::UpstreamUnavailable { .. } => "upstream_unavailable",
            GatewayError::UpstreamTimeout { .. } => "upstream_timeout",
        }
    }
}

impl From<AuthFailure> for GatewayError {
    fn from(failure: AuthFailure) -> Self {
        match failure {
            AuthFailure::MissingCredential => GatewayError::MissingCredential,
            AuthFailure::Unauthenticated(e) => GatewayError::Unauthenticated(e),
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::MissingCredential => {
                AppError::unauthorized("Authentication required: missing bearer token")
            }
            // Expired and forged tokens get the same answer
            GatewayError::Unauthenticated(_) => AppError::forbidden("Invalid or expired token"),
            GatewayError::Forbidden { actual, required } => AppError::forbidden(format!(
                "Access denied: your role is '{}' but this area requires '{}'",
                actual, required
            )),
            GatewayError::NotFound => AppError::not_found("No route matches this path"),
            GatewayError::PayloadTooLarge { limit } => {
                AppError::payload_too_large(format!("Request body exceeds {} bytes", limit))
            }
            GatewayError::BadRequest(reason) => AppError::bad_request(reason),
            GatewayError::UpstreamUnavailable { upstream, .. } => {
                AppError::bad_gateway(format!("Upstream service '{}' is unavailable", upstream))
            }
            GatewayError::UpstreamTimeout { upstream } => {
                AppError::gateway_timeout(format!("Upstream service '{}' timed out", upstream))
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
