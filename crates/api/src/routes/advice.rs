use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::routes::models::AdviceResponse;
use crate::util::require_bearer;
use crate::{ApiError, AppState};

pub async fn get_advice(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AdviceResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let user = state.authenticate(&token).await?;

    let advice = state.advice().advise(&user).await?;

    Ok(Json(AdviceResponse { advice }))
}
