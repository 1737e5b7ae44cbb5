//! Token claim structures.
//!
//! The payload layout is `{"email", "role", "iat", "exp"}` with Unix-second
//! timestamps, the same claim names the authentication service has always
//! signed, so tokens stay interchangeable between services.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role. There is no hierarchy between roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Coach,
    Player,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Coach => "coach",
            Role::Player => "player",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coach" => Ok(Role::Coach),
            "player" => Ok(Role::Player),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// JWT claims carried by session tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account identity (the account's email address)
    pub email: String,
    pub role: Role,
    /// Issued-at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}
