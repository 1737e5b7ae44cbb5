use axum::Json;
use axum::extract::State;
use squadgate_core::AppError;

use super::model::{LoginRequest, LoginResponse};
use super::service::AuthService;
use crate::state::AuthServiceState;
use crate::validator::ValidatedJson;

/// `POST /login`
pub async fn login(
    State(state): State<AuthServiceState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(state.store.as_ref(), &state.tokens, dto).await?;
    Ok(Json(response))
}
