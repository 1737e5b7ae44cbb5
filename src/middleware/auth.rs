use axum::http::HeaderMap;
use squadgate_auth::{TokenService, VerifiedIdentity, authenticate};
use tracing::{debug, warn};

use crate::error::GatewayError;
use crate::metrics::track_auth_rejection;

/// The verified caller of a protected request.
///
/// Inserted into the request extensions once authentication succeeds so later
/// stages can read it without re-verifying.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub VerifiedIdentity);

impl AuthenticatedUser {
    pub fn email(&self) -> &str {
        self.0.identity()
    }

    pub fn role(&self) -> squadgate_auth::Role {
        self.0.role()
    }
}

/// Verifies the bearer credential on a protected request.
///
/// The credential itself never appears in logs.
pub fn authenticate_request(
    headers: &HeaderMap,
    tokens: &TokenService,
) -> Result<AuthenticatedUser, GatewayError> {
    match authenticate(headers, tokens) {
        Ok(identity) => {
            debug!(
                identity = %identity.identity(),
                role = %identity.role(),
                "token accepted"
            );
            Ok(AuthenticatedUser(identity))
        }
        Err(failure) => {
            let err = GatewayError::from(failure);
            warn!(reason = %err.kind(), "authentication failed");
            track_auth_rejection(err.kind());
            Err(err)
        }
    }
}
