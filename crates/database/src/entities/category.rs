//! Category entity definitions

use serde::Serialize;
use sqlx::FromRow;

/// A spending label. Names are unique per owner, not globally.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Insert payload for a new category row.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub user_id: i64,
    pub name: String,
}
