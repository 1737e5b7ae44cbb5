//! # SquadGate CLI
//!
//! Helpers behind the `squadgate-cli` binary.
//!
//! ## Usage
//!
//! ```bash
//! # Print a bcrypt hash, or a ready-to-paste USERS_FILE entry
//! squadgate-cli hash-password
//! squadgate-cli hash-password --email coach@example.com --role coach
//!
//! # Check a token against JWT_SECRET
//! squadgate-cli inspect-token <token>
//! ```

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use squadgate_auth::{Role, TokenService};
use squadgate_core::hash_password;

/// Hashes `password` with bcrypt at the default cost.
pub fn hash(password: &str) -> anyhow::Result<String> {
    if password.is_empty() {
        return Err(anyhow!("Password must not be empty"));
    }
    hash_password(password).map_err(|e| anyhow!(e.message()))
}

/// One element of the identity file read by the authentication service.
pub fn users_file_entry(email: &str, password_hash: &str, role: Role) -> Value {
    json!({
        "email": email,
        "password_hash": password_hash,
        "role": role,
    })
}

/// Human-readable verdict on a token, checked at `now`.
///
/// Rejections only name the kind; the token itself is never echoed.
pub fn describe_token(tokens: &TokenService, token: &str, now: DateTime<Utc>) -> Result<String, String> {
    match tokens.verify_at(token, now) {
        Ok(identity) => Ok(format!(
            "valid\n  identity:   {}\n  role:       {}\n  issued at:  {}\n  expires at: {}",
            identity.identity(),
            identity.role(),
            identity.issued_at().to_rfc3339(),
            identity.expires_at().to_rfc3339(),
        )),
        Err(e) => Err(format!("rejected: {}", e.kind())),
    }
}
