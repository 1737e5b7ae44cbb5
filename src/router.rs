use crate::logging::logging_middleware;
use crate::metrics::{metrics_middleware, render_metrics};
use crate::modules::auth::router::init_auth_router;
use crate::proxy::dispatch;
use crate::state::{AppState, AuthServiceState};
use axum::http::{HeaderValue, Method};
use axum::{Json, Router, middleware, routing::get};
use serde_json::{Value, json};
use squadgate_config::CorsConfig;
use tower_http::cors::CorsLayer;

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}

/// Gateway router: local `/health` and `/metrics`, everything else goes
/// through the route table.
pub fn init_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_config);

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        .fallback(dispatch)
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

/// Authentication service router.
pub fn init_auth_service_router(state: AuthServiceState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        .merge(init_auth_router())
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
