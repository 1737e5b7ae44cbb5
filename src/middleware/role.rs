//! Role authorization for protected routes.
//!
//! Roles do not form a hierarchy: an admin token opens `/admin` only, and a
//! coach token opens `/coach` only.

use squadgate_auth::Role;
use tracing::warn;

use crate::error::GatewayError;
use crate::metrics::track_authorization_check;
use crate::middleware::auth::AuthenticatedUser;

pub fn require_role(user: &AuthenticatedUser, required: Role) -> Result<(), GatewayError> {
    let actual = user.role();
    let allowed = actual == required;
    track_authorization_check(allowed, required.as_str());

    if !allowed {
        warn!(
            identity = %user.email(),
            role = %actual,
            required = %required,
            "role not permitted for route"
        );
        return Err(GatewayError::Forbidden { actual, required });
    }

    Ok(())
}
