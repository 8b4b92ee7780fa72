//! Account entity definitions

use serde::Serialize;
use sqlx::FromRow;

/// A money container owned by a user. Amounts are integer minor units.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Account {
    pub id: i64,
    pub user_id: i64,
    pub currency_id: i64,
    pub name: String,
    pub initial_amount: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Insert payload for a new account row.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub user_id: i64,
    pub currency_id: i64,
    pub name: String,
    pub initial_amount: i64,
}

/// Partial update for an existing account row.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub currency_id: Option<i64>,
    pub initial_amount: Option<i64>,
}
