//! Shared request and response bodies for the HTTP surface.

use serde::{Deserialize, Serialize};
use spendlog_database::{Account, Category, Expense};

use crate::services::paging::{DEFAULT_PAGE, DEFAULT_PER_PAGE};

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_per_page() -> i64 {
    DEFAULT_PER_PAGE
}

fn default_currency_id() -> i64 {
    1
}

/// One-based pagination window shared by the listing endpoints.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(default = "default_currency_id")]
    pub currency_id: i64,
    pub name: String,
    #[serde(default)]
    pub initial_amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    pub currency_id: Option<i64>,
    pub initial_amount: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub category_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateExpenseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub amount: Option<i64>,
    pub category_id: Option<i64>,
}

/// Expense listing filters layered over the pagination window. The two
/// filters combine when both are present.
#[derive(Debug, Deserialize)]
pub struct ExpenseListQuery {
    pub account_id: Option<i64>,
    pub category_id: Option<i64>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

#[derive(Debug, Serialize)]
pub struct AccountsResponse {
    pub accounts: Vec<Account>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct ExpensesResponse {
    pub expenses: Vec<Expense>,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub advice: String,
}
