use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use spendlog_database::{Account, AccountUpdate};

use crate::routes::models::{
    AccountsResponse, CreateAccountRequest, PageQuery, UpdateAccountRequest,
};
use crate::services::account::CreateAccount;
use crate::util::require_bearer;
use crate::{ApiError, AppState};

pub async fn create_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    let account = state
        .accounts()
        .create(
            &user,
            CreateAccount {
                currency_id: request.currency_id,
                name: request.name,
                initial_amount: request.initial_amount,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(account)))
}

pub async fn list_accounts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<Json<AccountsResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    let accounts = state.accounts().list(&user, query.page, query.per_page).await?;

    Ok(Json(AccountsResponse { accounts }))
}

pub async fn get_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(account_id): Path<i64>,
) -> Result<Json<Account>, ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    let account = state.accounts().get(&user, account_id).await?;

    Ok(Json(account))
}

pub async fn update_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(account_id): Path<i64>,
    Json(request): Json<UpdateAccountRequest>,
) -> Result<Json<Account>, ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    let account = state
        .accounts()
        .update(
            &user,
            account_id,
            AccountUpdate {
                name: request.name,
                currency_id: request.currency_id,
                initial_amount: request.initial_amount,
            },
        )
        .await?;

    Ok(Json(account))
}

pub async fn delete_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(account_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    state.accounts().delete(&user, account_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
