use anyhow::Context;
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use crate::error::GatewayError;
use crate::proxy::RouteLabel;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0, 30.0,
];

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

/// Install the Prometheus recorder and its upkeep task.
/// Returns `None` if observability is disabled.
pub fn init_metrics() -> anyhow::Result<Option<PrometheusHandle>> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )
        .context("Failed to set request latency buckets")?
        .set_buckets_for_metric(
            Matcher::Full("upstream_request_duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )
        .context("Failed to set upstream latency buckets")?
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// Tracks request counts and latency labelled by route prefix, never by the
/// raw path, so proxied paths do not explode label cardinality.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let matched = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();
    let route = response
        .extensions()
        .get::<RouteLabel>()
        .map(|label| label.0.clone())
        .or(matched)
        .unwrap_or_else(|| "unmatched".to_string());

    counter!("http_requests_total", "method" => method.clone(), "route" => route.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "route" => route).record(latency);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// `GET /metrics`
pub async fn render_metrics(State(metrics): State<Option<PrometheusHandle>>) -> Response {
    match metrics {
        Some(handle) => handle.render().into_response(),
        None => GatewayError::NotFound.into_response(),
    }
}

/// Count a rejected authentication by its kind.
pub fn track_auth_rejection(kind: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("auth_rejections_total", "kind" => kind).increment(1);
}

pub fn track_authorization_check(allowed: bool, required_role: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    let status = if allowed { "allowed" } else { "denied" };
    counter!("authorization_checks_total", "role" => required_role, "status" => status)
        .increment(1);
}

/// Record one upstream call. `outcome` is the upstream status code or the
/// failure kind when no response arrived.
pub fn track_upstream(upstream: &'static str, outcome: &str, duration_secs: f64) {
    if !is_observability_enabled() {
        return;
    }
    counter!("upstream_requests_total", "upstream" => upstream, "outcome" => outcome.to_string())
        .increment(1);
    histogram!("upstream_request_duration_seconds", "upstream" => upstream).record(duration_secs);
}

pub fn track_login(success: bool) {
    if !is_observability_enabled() {
        return;
    }
    let status = if success { "success" } else { "failure" };
    counter!("logins_total", "status" => status).increment(1);
}

pub fn track_token_issued() {
    if !is_observability_enabled() {
        return;
    }
    counter!("tokens_issued_total").increment(1);
}
