//! Bearer credential parsing and request authentication.
//!
//! The gateway authenticates every protected request with [`authenticate`].
//! Upstream services re-verify the same forwarded token with the [`AuthUser`]
//! extractor rather than trusting the gateway.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use squadgate_core::AppError;

use crate::identity::VerifiedIdentity;
use crate::jwt::{TokenError, TokenService};

pub const BEARER_SCHEME: &str = "Bearer";

/// Extracts the credential from an `Authorization` value of the form
/// `Bearer <token>`.
///
/// The scheme is matched case-sensitively and the credential is the second
/// space-separated segment. Anything else yields `None`.
pub fn bearer_token(value: &str) -> Option<&str> {
    let mut segments = value.split(' ');
    if segments.next()? != BEARER_SCHEME {
        return None;
    }
    segments.next().filter(|token| !token.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    /// No usable bearer credential in the request.
    #[error("missing bearer credential")]
    MissingCredential,

    /// A credential was presented but failed verification.
    #[error("unauthenticated: {0}")]
    Unauthenticated(#[from] TokenError),
}

/// Authenticates a request from its headers.
pub fn authenticate(
    headers: &HeaderMap,
    tokens: &TokenService,
) -> Result<VerifiedIdentity, AuthFailure> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AuthFailure::MissingCredential)?;

    Ok(tokens.verify(token)?)
}

impl From<AuthFailure> for AppError {
    fn from(failure: AuthFailure) -> Self {
        match failure {
            AuthFailure::MissingCredential => {
                AppError::unauthorized("Authentication required: missing bearer token")
            }
            AuthFailure::Unauthenticated(_) => {
                AppError::forbidden("Invalid or expired token")
            }
        }
    }
}

/// Extractor that verifies the bearer token and provides the caller's identity.
#[derive(Debug, Clone)]
pub struct AuthUser(pub VerifiedIdentity);

impl<S> FromRequestParts<S> for AuthUser
where
    Arc<TokenService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = Arc::<TokenService>::from_ref(state);
        let identity = authenticate(&parts.headers, &tokens)?;
        Ok(AuthUser(identity))
    }
}
