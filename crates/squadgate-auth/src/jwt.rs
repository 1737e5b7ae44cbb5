//! Token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the shared `JWT_SECRET`. Expiry is
//! checked here rather than by `jsonwebtoken` so the clock can be supplied
//! explicitly and the boundary is exact: a token is accepted while
//! `now <= exp` and rejected from `exp + 1` on.
//!
//! # Example
//!
//! ```ignore
//! use squadgate_auth::{IdentityRecord, TokenService};
//! use squadgate_config::JwtConfig;
//!
//! let tokens = TokenService::new(&JwtConfig::from_env()?);
//!
//! // `record` comes from an IdentityStore lookup
//! let issued = tokens.issue(&record)?;
//!
//! let verified = tokens.verify(&issued.token)?;
//! assert_eq!(verified.role(), record.role());
//! ```

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use squadgate_config::JwtConfig;

use crate::claims::Claims;
use crate::identity::{IdentityRecord, VerifiedIdentity};

/// Why a token was refused. Callers must treat every variant as a rejection;
/// the distinction only feeds logs and metrics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token signature or payload is invalid")]
    Invalid,

    #[error("token has expired")]
    Expired,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl TokenError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::Invalid => "invalid",
            TokenError::Expired => "expired",
            TokenError::Signing(_) => "signing",
        }
    }
}

/// A freshly signed token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies session tokens with the process-wide secret.
///
/// Built once at startup and shared read-only; cloning is cheap enough to hand
/// a copy to each service state.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    validity: Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            validity: Duration::try_seconds(config.token_expiry).unwrap_or(Duration::MAX),
        }
    }

    /// How long issued tokens stay valid.
    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Signs a token for an account loaded from the identity store.
    pub fn issue(&self, identity: &IdentityRecord) -> Result<IssuedToken, TokenError> {
        self.issue_at(identity, Utc::now())
    }

    pub fn issue_at(
        &self,
        identity: &IdentityRecord,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let expires_at = now
            .checked_add_signed(self.validity)
            .ok_or_else(|| TokenError::Signing("token expiry out of range".to_string()))?;
        let claims = Claims {
            email: identity.email().to_string(),
            role: identity.role(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Checks signature and expiry against the current time.
    pub fn verify(&self, token: &str) -> Result<VerifiedIdentity, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<VerifiedIdentity, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(reason = ?e.kind(), "token rejected");
                TokenError::Invalid
            })?;

        if now.timestamp() > claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(VerifiedIdentity::from_claims(claims))
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("validity", &self.validity)
            .finish_non_exhaustive()
    }
}
