use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use spendlog_database::{Expense, ExpenseUpdate};

use crate::routes::models::{
    CreateExpenseRequest, ExpenseListQuery, ExpensesResponse, UpdateExpenseRequest,
};
use crate::services::expense::CreateExpense;
use crate::util::require_bearer;
use crate::{ApiError, AppState};

pub async fn create_expense(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(account_id): Path<i64>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    let expense = state
        .expenses()
        .create(
            &user,
            account_id,
            CreateExpense {
                category_id: request.category_id,
                name: request.name,
                description: request.description,
                amount: request.amount,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn list_expenses(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ExpenseListQuery>,
) -> Result<Json<ExpensesResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    let expenses = match (query.account_id, query.category_id) {
        (Some(account_id), Some(category_id)) => {
            state
                .expenses()
                .list_for_account_category(&user, account_id, category_id, query.page, query.per_page)
                .await?
        }
        (Some(account_id), None) => {
            state
                .expenses()
                .list_for_account(&user, account_id, query.page, query.per_page)
                .await?
        }
        (None, Some(category_id)) => {
            state
                .expenses()
                .list_for_category(&user, category_id, query.page, query.per_page)
                .await?
        }
        (None, None) => {
            state
                .expenses()
                .list_for_user(&user, query.page, query.per_page)
                .await?
        }
    };

    Ok(Json(ExpensesResponse { expenses }))
}

pub async fn get_expense(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(expense_id): Path<i64>,
) -> Result<Json<Expense>, ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    let expense = state.expenses().get(&user, expense_id).await?;

    Ok(Json(expense))
}

pub async fn update_expense(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(expense_id): Path<i64>,
    Json(request): Json<UpdateExpenseRequest>,
) -> Result<Json<Expense>, ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    let expense = state
        .expenses()
        .update(
            &user,
            expense_id,
            ExpenseUpdate {
                name: request.name,
                description: request.description,
                amount: request.amount,
                category_id: request.category_id,
            },
        )
        .await?;

    Ok(Json(expense))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(expense_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    state.expenses().delete(&user, expense_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
