//! Upstream services re-verify the forwarded bearer token themselves.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{Json, Router, routing::get};
use common::{TEST_SECRET, body_json, send, start_gateway_with, test_tokens, token_for};
use serde_json::{Value, json};
use squadgate::squadgate_auth::{AuthUser, Role, TokenService};
use squadgate::squadgate_config::JwtConfig;

async fn whoami(AuthUser(identity): AuthUser) -> Json<Value> {
    Json(json!({
        "identity": identity.identity(),
        "role": identity.role(),
    }))
}

/// A coach-service stand-in that trusts nothing the gateway did.
async fn spawn_upstream(secret: &str) -> String {
    let tokens = Arc::new(TokenService::new(&JwtConfig {
        secret: secret.to_string(),
        token_expiry: 86_400,
    }));
    let app = Router::new().route("/whoami", get(whoami)).with_state(tokens);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_upstream_sees_same_identity() {
    let upstream = spawn_upstream(TEST_SECRET).await;
    let gw = start_gateway_with(&[("COACH_SERVICE_URL", upstream.as_str())]).await;
    let token = token_for(&test_tokens(), "coach@example.com", Role::Coach);

    let response = send(
        &gw.app,
        Request::builder()
            .uri("/coach/whoami")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"identity": "coach@example.com", "role": "coach"})
    );
}

#[tokio::test]
async fn test_upstream_with_other_secret_rejects_forwarded_token() {
    let upstream = spawn_upstream("a-different-upstream-secret-0123456789").await;
    let gw = start_gateway_with(&[("COACH_SERVICE_URL", upstream.as_str())]).await;
    let token = token_for(&test_tokens(), "coach@example.com", Role::Coach);

    let response = send(
        &gw.app,
        Request::builder()
            .uri("/coach/whoami")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    // The upstream's 403 is relayed as-is
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
