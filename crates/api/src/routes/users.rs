use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use spendlog_database::User;

use crate::routes::models::{RegisterRequest, UpdateUserRequest};
use crate::services::user::{ProfileUpdate, Registration};
use crate::util::require_bearer;
use crate::{ApiError, AppState};

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state
        .users()
        .register(Registration {
            email: request.email,
            full_name: request.full_name,
            password: request.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    let profile = state.users().get(&user, user_id).await?;

    Ok(Json(profile))
}

pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    let updated = state
        .users()
        .update(
            &user,
            user_id,
            ProfileUpdate {
                email: request.email,
                full_name: request.full_name,
                password: request.password,
            },
        )
        .await?;

    Ok(Json(updated))
}

pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    state.users().delete(&user, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
