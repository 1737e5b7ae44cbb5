//! Identity values on both sides of a token.
//!
//! [`IdentityRecord`] is what an identity store hands back for an account and
//! is the only input [`TokenService::issue`](crate::TokenService::issue)
//! accepts, so a token's role always comes from the store of record.
//! [`VerifiedIdentity`] is what verification hands back; it has no public
//! constructor, so holding one proves a token was checked.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::claims::{Claims, Role};

/// An account as recorded by the identity store.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct IdentityRecord {
    email: String,
    password_hash: String,
    role: Role,
}

impl IdentityRecord {
    /// Builds a record. Meant for identity store implementations, which load
    /// records from their backing storage.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            role,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

impl std::fmt::Debug for IdentityRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityRecord")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Identity and role taken from a token whose signature and expiry have been
/// checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    identity: String,
    role: Role,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl VerifiedIdentity {
    pub(crate) fn from_claims(claims: Claims) -> Self {
        Self {
            identity: claims.email,
            role: claims.role,
            issued_at: DateTime::from_timestamp(claims.iat, 0).unwrap_or(DateTime::UNIX_EPOCH),
            expires_at: DateTime::from_timestamp(claims.exp, 0).unwrap_or(DateTime::UNIX_EPOCH),
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}
