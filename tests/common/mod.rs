use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use squadgate::router::init_router;
use squadgate::squadgate_auth::{IdentityRecord, Role, TokenService};
use squadgate::squadgate_config::{GatewayConfig, JwtConfig};
use squadgate::state::AppState;
use std::collections::HashMap;
use tower::ServiceExt;
use wiremock::MockServer;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// A gateway wired to four mock upstreams.
#[allow(dead_code)]
pub struct TestGateway {
    pub app: Router,
    pub tokens: Arc<TokenService>,
    pub registration: MockServer,
    pub authentication: MockServer,
    pub coach: MockServer,
    pub player: MockServer,
}

#[allow(dead_code)]
pub async fn start_gateway() -> TestGateway {
    start_gateway_with(&[]).await
}

/// Starts the mocks and builds the gateway; `overrides` replace or add
/// configuration variables.
pub async fn start_gateway_with(overrides: &[(&str, &str)]) -> TestGateway {
    let registration = MockServer::start().await;
    let authentication = MockServer::start().await;
    let coach = MockServer::start().await;
    let player = MockServer::start().await;

    let mut vars: HashMap<String, String> = HashMap::from([
        ("JWT_SECRET".to_string(), TEST_SECRET.to_string()),
        ("REGISTRATION_SERVICE_URL".to_string(), registration.uri()),
        ("AUTH_SERVICE_URL".to_string(), authentication.uri()),
        ("COACH_SERVICE_URL".to_string(), coach.uri()),
        ("PLAYER_SERVICE_URL".to_string(), player.uri()),
    ]);
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    let config = GatewayConfig::from_lookup(|key: &str| vars.get(key).cloned()).unwrap();
    let state = AppState::new(&config, None).unwrap();
    let tokens = state.tokens.clone();

    TestGateway {
        app: init_router(state),
        tokens,
        registration,
        authentication,
        coach,
        player,
    }
}

/// Token service with the same secret the test gateway uses.
#[allow(dead_code)]
pub fn test_tokens() -> TokenService {
    TokenService::new(&JwtConfig {
        secret: TEST_SECRET.to_string(),
        token_expiry: 86_400,
    })
}

#[allow(dead_code)]
pub fn token_for(tokens: &TokenService, email: &str, role: Role) -> String {
    tokens
        .issue(&IdentityRecord::new(email, "unused", role))
        .unwrap()
        .token
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
