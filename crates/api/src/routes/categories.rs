use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use spendlog_database::Category;

use crate::routes::models::{CategoriesResponse, CreateCategoryRequest, PageQuery};
use crate::util::require_bearer;
use crate::{ApiError, AppState};

pub async fn create_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    let category = state.categories().create(&user, request.name).await?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn list_categories(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    let categories = state
        .categories()
        .list(&user, query.page, query.per_page)
        .await?;

    Ok(Json(CategoriesResponse { categories }))
}

pub async fn get_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(category_id): Path<i64>,
) -> Result<Json<Category>, ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    let category = state.categories().get(&user, category_id).await?;

    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(category_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    state.categories().delete(&user, category_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
