//! Expense entity definitions

use serde::Serialize;
use sqlx::FromRow;

/// A spending record tied to an account and optionally a category.
///
/// Deleting the category leaves the expense in place with `category_id`
/// cleared; deleting the account removes its expenses.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub account_id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: String,
    pub amount: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Insert payload for a new expense row.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub user_id: i64,
    pub account_id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: String,
    pub amount: i64,
}

/// Partial update for an existing expense row. The owning account cannot
/// be changed after creation.
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub amount: Option<i64>,
    pub category_id: Option<i64>,
}
