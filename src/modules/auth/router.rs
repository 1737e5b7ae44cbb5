use axum::{Router, routing::post};

use super::controller::login;
use crate::state::AuthServiceState;

pub fn init_auth_router() -> Router<AuthServiceState> {
    Router::new().route("/login", post(login))
}
