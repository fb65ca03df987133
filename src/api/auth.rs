use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::JsonBody;
use crate::api::payloads::LoginRequest;
use crate::api::server::AppState;

#[derive(Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub user_id: i64,
    pub name: String,
}

/// Plaintext email/password check. Unknown email and wrong password produce
/// the same 401 body.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let credentials = payload.validate()?;

    match state
        .store
        .find_by_credentials(&credentials.email, &credentials.password)
        .await?
    {
        Some(user) => {
            info!(email = %credentials.email, "successful login");
            Ok(Json(LoginResponse {
                status: "success",
                user_id: user.id,
                name: user.name,
            }))
        }
        None => {
            warn!(email = %credentials.email, "failed login attempt");
            Err(ApiError::InvalidCredentials)
        }
    }
}
