use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::JsonBody;
use crate::api::payloads::{CreateUserRequest, SearchQuery, UpdateUserRequest};
use crate::api::server::AppState;
use crate::db::models::UserSummary;

#[derive(Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserSummary>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[instrument(skip_all)]
pub async fn list_users(State(state): State<Arc<AppState>>) -> ApiResult<Json<UsersResponse>> {
    let users = state.store.list().await?;
    info!(count = users.len(), "retrieved users");

    Ok(Json(UsersResponse { users }))
}

#[instrument(skip(state))]
pub async fn get_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<UserSummary>> {
    match state.store.find_by_id(&id).await? {
        Some(user) => {
            info!(name = %user.name, "user found");
            Ok(Json(user.into()))
        }
        None => {
            info!("user not found");
            Err(ApiError::NotFound)
        }
    }
}

#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let user = payload.validate()?;
    let id = state.store.insert(&user).await?;
    info!(id, name = %user.name, "user created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created successfully",
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<UpdateUserRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let changes = payload.validate()?;
    if state.store.update(&id, &changes).await? == 0 {
        return Err(ApiError::NotFound);
    }
    info!("user updated");

    Ok(Json(MessageResponse {
        message: "User updated successfully",
    }))
}

#[instrument(skip(state))]
pub async fn delete_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MessageResponse>> {
    if state.store.delete(&id).await? == 0 {
        return Err(ApiError::NotFound);
    }
    info!("user deleted");

    Ok(Json(MessageResponse {
        message: "User deleted successfully",
    }))
}

#[instrument(skip_all)]
pub async fn search_users(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<UsersResponse>> {
    // An unreadable query string is treated the same as a missing name.
    let pairs = query.map(|Query(pairs)| pairs).unwrap_or_default();
    let name = SearchQuery::from_pairs(pairs).validate()?;
    let users = state.store.search_by_name(&name).await?;
    info!(%name, count = users.len(), "search completed");

    Ok(Json(UsersResponse { users }))
}
