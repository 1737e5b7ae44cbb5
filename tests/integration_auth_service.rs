mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, send, start_gateway, test_tokens};
use serde_json::json;
use squadgate::router::init_auth_service_router;
use squadgate::squadgate_auth::{IdentityRecord, Role, StaticIdentityStore};
use squadgate::state::AuthServiceState;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn auth_app() -> Router {
    let records = [
        ("coach@example.com", "coachpass", Role::Coach),
        ("player@example.com", "playerpass", Role::Player),
    ]
    .map(|(email, password, role)| {
        IdentityRecord::new(email, bcrypt::hash(password, 4).unwrap(), role)
    });

    init_auth_service_router(AuthServiceState {
        tokens: Arc::new(test_tokens()),
        store: Arc::new(StaticIdentityStore::from_records(records)),
        metrics: None,
    })
}

fn login_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_login_success() {
    let app = auth_app();

    let response = send(
        &app,
        login_request(json!({"email": "coach@example.com", "password": "coachpass"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 86_400);

    let identity = test_tokens().verify(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(identity.identity(), "coach@example.com");
    assert_eq!(identity.role(), Role::Coach);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = auth_app();

    let wrong = send(
        &app,
        login_request(json!({"email": "coach@example.com", "password": "nope"})),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong = body_json(wrong).await;

    let unknown = send(
        &app,
        login_request(json!({"email": "ghost@example.com", "password": "coachpass"})),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(wrong, body_json(unknown).await);
}

#[tokio::test]
async fn test_login_validation() {
    let app = auth_app();

    let bad_email = send(
        &app,
        login_request(json!({"email": "not-an-email", "password": "x"})),
    )
    .await;
    assert_eq!(bad_email.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let empty_password = send(
        &app,
        login_request(json!({"email": "coach@example.com", "password": ""})),
    )
    .await;
    assert_eq!(empty_password.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let missing_field = send(&app, login_request(json!({"email": "coach@example.com"}))).await;
    assert_eq!(missing_field.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(missing_field).await["error"], "password is required");
}

#[tokio::test]
async fn test_issued_token_opens_matching_gateway_route() {
    let app = auth_app();
    let gw = start_gateway().await;

    let login = send(
        &app,
        login_request(json!({"email": "player@example.com", "password": "playerpass"})),
    )
    .await;
    let token = body_json(login).await["token"].as_str().unwrap().to_string();

    Mock::given(method("GET"))
        .and(path("/myvods"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&gw.player)
        .await;

    let allowed = send(
        &gw.app,
        Request::builder()
            .uri("/player/myvods")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(allowed.status(), StatusCode::OK);

    let denied = send(
        &gw.app,
        Request::builder()
            .uri("/coach/roster")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);
}
