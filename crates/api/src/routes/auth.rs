use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use spendlog_auth::AuthSession;
use spendlog_database::User;

use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: User,
    pub expires_at: String,
}

impl SessionResponse {
    pub fn new(session: AuthSession) -> Self {
        Self {
            token: session.token,
            user: session.user,
            expires_at: session.expires_at.to_rfc3339(),
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state
        .authenticator()
        .login_with_password(&request.email, &request.password)
        .await?;

    Ok(Json(SessionResponse::new(session)))
}
