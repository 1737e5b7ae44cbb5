//! The gateway's dispatcher: route lookup, authorization, forwarding.
//!
//! Every request that is not a gateway-local route lands in [`dispatch`]:
//!
//! ```text
//! resolve path ──none──▶ 404
//!     │
//!     ├─ public ──────────────────────────────────▶ forward
//!     │
//!     └─ protected ─▶ authenticate ─▶ require role ─▶ forward
//!                        │ 401/403        │ 403
//! ```
//!
//! A failure at any step ends the request without contacting the upstream.

pub mod forward;
pub mod headers;

use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::GatewayError;
use crate::middleware::auth::authenticate_request;
use crate::middleware::role::require_role;
use crate::routes::RouteMatch;
use crate::state::AppState;

pub use forward::Forwarder;

/// Route prefix that handled a request, attached to the response for metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLabel(pub String);

pub async fn dispatch(State(state): State<AppState>, req: Request) -> Response {
    let path = req.uri().path().to_owned();

    let Some(route) = state.routes.resolve(&path) else {
        debug!(path = %path, "no route for path");
        return GatewayError::NotFound.into_response();
    };

    let label = RouteLabel(route.rule.prefix.clone());
    let mut response = match proxy(&state, route, req).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    };
    response.extensions_mut().insert(label);
    response
}

async fn proxy(
    state: &AppState,
    route: RouteMatch<'_>,
    mut req: Request,
) -> Result<Response, GatewayError> {
    if let Some(required) = route.rule.required_role {
        let user = authenticate_request(req.headers(), &state.tokens)?;
        require_role(&user, required)?;
        req.extensions_mut().insert(user);
    }

    state
        .forwarder
        .forward(route.rule.upstream, route.forward_path, req)
        .await
}
