use spendlog_advisor::AdviceClient;
use spendlog_auth::Authenticator;
use spendlog_database::{
    AccountRepository, CategoryRepository, ExpenseRepository, User, UserRepository,
};
use sqlx::SqlitePool;

use crate::services::account::AccountService;
use crate::services::advice::AdviceService;
use crate::services::category::CategoryService;
use crate::services::expense::ExpenseService;
use crate::services::user::UserService;
use crate::ApiError;

/// Everything the handlers need, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    authenticator: Authenticator,
    users: UserService<UserRepository>,
    accounts: AccountService<AccountRepository>,
    categories: CategoryService<CategoryRepository>,
    expenses: ExpenseService<AccountRepository, CategoryRepository, ExpenseRepository>,
    advice: AdviceService<ExpenseRepository>,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        authenticator: Authenticator,
        advisor: Option<AdviceClient>,
    ) -> Self {
        Self {
            authenticator,
            users: UserService::new(pool.clone()),
            accounts: AccountService::new(pool.clone()),
            categories: CategoryService::new(pool.clone()),
            expenses: ExpenseService::new(pool.clone()),
            advice: AdviceService::new(pool, advisor),
        }
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn users(&self) -> &UserService<UserRepository> {
        &self.users
    }

    pub fn accounts(&self) -> &AccountService<AccountRepository> {
        &self.accounts
    }

    pub fn categories(&self) -> &CategoryService<CategoryRepository> {
        &self.categories
    }

    pub fn expenses(
        &self,
    ) -> &ExpenseService<AccountRepository, CategoryRepository, ExpenseRepository> {
        &self.expenses
    }

    pub fn advice(&self) -> &AdviceService<ExpenseRepository> {
        &self.advice
    }

    pub async fn authenticate(&self, token: &str) -> Result<User, ApiError> {
        self.authenticator
            .authenticate_token(token)
            .await
            .map_err(ApiError::from)
    }
}
