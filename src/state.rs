use std::sync::Arc;

use axum::extract::FromRef;
use metrics_exporter_prometheus::PrometheusHandle;
use squadgate_auth::{IdentityStore, TokenService};
use squadgate_config::{CorsConfig, GatewayConfig};

use crate::proxy::Forwarder;
use crate::routes::RouteTable;

/// Shared, read-only gateway state built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub routes: Arc<RouteTable>,
    pub forwarder: Forwarder,
    pub cors_config: CorsConfig,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        config: &GatewayConfig,
        metrics: Option<PrometheusHandle>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            tokens: Arc::new(TokenService::new(&config.jwt)),
            routes: Arc::new(RouteTable::gateway_default()?),
            forwarder: Forwarder::new(&config.upstreams),
            cors_config: config.cors.clone(),
            metrics,
        })
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

impl FromRef<AppState> for Option<PrometheusHandle> {
    fn from_ref(state: &AppState) -> Self {
        state.metrics.clone()
    }
}

/// State of the authentication service.
#[derive(Clone)]
pub struct AuthServiceState {
    pub tokens: Arc<TokenService>,
    pub store: Arc<dyn IdentityStore>,
    pub metrics: Option<PrometheusHandle>,
}

impl FromRef<AuthServiceState> for Arc<TokenService> {
    fn from_ref(state: &AuthServiceState) -> Self {
        state.tokens.clone()
    }
}

impl FromRef<AuthServiceState> for Option<PrometheusHandle> {
    fn from_ref(state: &AuthServiceState) -> Self {
        state.metrics.clone()
    }
}
