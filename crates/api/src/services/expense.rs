//! Expense recording and querying.
//!
//! Expense listings from the storage layer are not user-scoped when they
//! filter by account or category, so every filter target is checked for
//! ownership here before the listing runs.

use spendlog_database::{
    AccountRepository, CategoryRepository, Expense, ExpenseRepository, ExpenseUpdate, NewExpense,
    StoreResult, User,
};
use sqlx::SqlitePool;
use tracing::info;

use super::account::AccountStore;
use super::category::CategoryStore;
use super::error::ServiceError;
use super::mock_stores::{MockAccountStore, MockCategoryStore, MockExpenseStore};
use super::paging::page_window;

/// Payload accepted by [`ExpenseService::create`]. A negative amount
/// records a refund.
#[derive(Debug, Clone)]
pub struct CreateExpense {
    pub category_id: Option<i64>,
    pub name: String,
    pub description: String,
    pub amount: i64,
}

/// Service for recording and querying expenses
#[derive(Clone)]
pub struct ExpenseService<A, C, E> {
    accounts: A,
    categories: C,
    expenses: E,
}

impl ExpenseService<AccountRepository, CategoryRepository, ExpenseRepository> {
    /// Create an expense service backed by the real database repositories
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            accounts: AccountRepository::new(pool.clone()),
            categories: CategoryRepository::new(pool.clone()),
            expenses: ExpenseRepository::new(pool),
        }
    }
}

impl ExpenseService<MockAccountStore, MockCategoryStore, MockExpenseStore> {
    /// Create an expense service for testing over pre-seeded mock stores
    pub fn new_for_testing(
        accounts: MockAccountStore,
        categories: MockCategoryStore,
        expenses: MockExpenseStore,
    ) -> Self {
        Self {
            accounts,
            categories,
            expenses,
        }
    }
}

impl<A, C, E> ExpenseService<A, C, E>
where
    A: AccountStore,
    C: CategoryStore,
    E: ExpenseStore,
{
    /// Record an expense against one of the actor's accounts.
    pub async fn create(
        &self,
        actor: &User,
        account_id: i64,
        create: CreateExpense,
    ) -> Result<Expense, ServiceError> {
        if create.name.trim().is_empty() {
            return Err(ServiceError::invalid_argument(
                "expense name cannot be empty",
            ));
        }

        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(ServiceError::AccountNotOwned)?;
        if account.user_id != actor.id {
            return Err(ServiceError::AccountNotOwned);
        }

        if let Some(category_id) = create.category_id {
            self.check_category(actor, category_id).await?;
        }

        let expense = self
            .expenses
            .insert(NewExpense {
                user_id: actor.id,
                account_id,
                category_id: create.category_id,
                name: create.name,
                description: create.description,
                amount: create.amount,
            })
            .await?;

        info!(
            expense_id = expense.id,
            account_id,
            user_id = actor.id,
            "recorded expense"
        );

        Ok(expense)
    }

    /// Fetch one expense. Absent rows are reported before foreign ones.
    pub async fn get(&self, actor: &User, expense_id: i64) -> Result<Expense, ServiceError> {
        let expense = self
            .expenses
            .find_by_id(expense_id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        if expense.user_id != actor.id {
            return Err(ServiceError::Forbidden);
        }

        Ok(expense)
    }

    /// List expenses across every user, newest first. Backoffice-style
    /// listing with no route; the HTTP surface only serves scoped queries.
    pub async fn list_all(&self, page: i64, per_page: i64) -> Result<Vec<Expense>, ServiceError> {
        let (limit, offset) = page_window(page, per_page)?;
        Ok(self.expenses.list_all(limit, offset).await?)
    }

    /// List the actor's expenses across all accounts, newest first.
    pub async fn list_for_user(
        &self,
        actor: &User,
        page: i64,
        per_page: i64,
    ) -> Result<Vec<Expense>, ServiceError> {
        let (limit, offset) = page_window(page, per_page)?;
        Ok(self.expenses.list_for_user(actor.id, limit, offset).await?)
    }

    /// List the expenses of one account the actor owns, newest first.
    pub async fn list_for_account(
        &self,
        actor: &User,
        account_id: i64,
        page: i64,
        per_page: i64,
    ) -> Result<Vec<Expense>, ServiceError> {
        let (limit, offset) = page_window(page, per_page)?;
        self.check_account(actor, account_id).await?;

        Ok(self
            .expenses
            .list_for_account(account_id, limit, offset)
            .await?)
    }

    /// List the expenses labelled with one of the actor's categories,
    /// newest first.
    pub async fn list_for_category(
        &self,
        actor: &User,
        category_id: i64,
        page: i64,
        per_page: i64,
    ) -> Result<Vec<Expense>, ServiceError> {
        let (limit, offset) = page_window(page, per_page)?;
        self.check_owned_category(actor, category_id).await?;

        Ok(self
            .expenses
            .list_for_category(category_id, limit, offset)
            .await?)
    }

    /// List one account's expenses narrowed to one category, newest first.
    pub async fn list_for_account_category(
        &self,
        actor: &User,
        account_id: i64,
        category_id: i64,
        page: i64,
        per_page: i64,
    ) -> Result<Vec<Expense>, ServiceError> {
        let (limit, offset) = page_window(page, per_page)?;
        self.check_account(actor, account_id).await?;
        self.check_owned_category(actor, category_id).await?;

        Ok(self
            .expenses
            .list_for_account_category(account_id, category_id, limit, offset)
            .await?)
    }

    /// Apply changes to an expense the actor owns. The owning account
    /// cannot be changed.
    pub async fn update(
        &self,
        actor: &User,
        expense_id: i64,
        changes: ExpenseUpdate,
    ) -> Result<Expense, ServiceError> {
        self.get(actor, expense_id).await?;

        if let Some(ref name) = changes.name {
            if name.trim().is_empty() {
                return Err(ServiceError::invalid_argument(
                    "expense name cannot be empty",
                ));
            }
        }
        if let Some(category_id) = changes.category_id {
            self.check_category(actor, category_id).await?;
        }

        Ok(self.expenses.update(expense_id, changes).await?)
    }

    /// Delete an expense the actor owns.
    pub async fn delete(&self, actor: &User, expense_id: i64) -> Result<(), ServiceError> {
        self.get(actor, expense_id).await?;
        self.expenses.delete(expense_id).await?;

        info!(expense_id, user_id = actor.id, "deleted expense");

        Ok(())
    }

    // Ownership checks for filter targets

    async fn check_account(&self, actor: &User, account_id: i64) -> Result<(), ServiceError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        if account.user_id != actor.id {
            return Err(ServiceError::Forbidden);
        }

        Ok(())
    }

    async fn check_owned_category(&self, actor: &User, category_id: i64) -> Result<(), ServiceError> {
        let category = self
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        if category.user_id != actor.id {
            return Err(ServiceError::Forbidden);
        }

        Ok(())
    }

    /// A category referenced from an expense must exist and belong to the
    /// actor; anything else reads as an invalid label.
    async fn check_category(&self, actor: &User, category_id: i64) -> Result<(), ServiceError> {
        match self.categories.find_by_id(category_id).await? {
            Some(category) if category.user_id == actor.id => Ok(()),
            _ => Err(ServiceError::invalid_argument("unknown category")),
        }
    }
}

/// Trait for expense stores to allow generic usage
pub trait ExpenseStore {
    async fn insert(&self, new: NewExpense) -> StoreResult<Expense>;
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Expense>>;
    async fn list_all(&self, limit: i64, offset: i64) -> StoreResult<Vec<Expense>>;
    async fn list_for_user(&self, user_id: i64, limit: i64, offset: i64)
        -> StoreResult<Vec<Expense>>;
    async fn list_for_account(
        &self,
        account_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>>;
    async fn list_for_category(
        &self,
        category_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>>;
    async fn list_for_account_category(
        &self,
        account_id: i64,
        category_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>>;
    async fn update(&self, id: i64, changes: ExpenseUpdate) -> StoreResult<Expense>;
    async fn delete(&self, id: i64) -> StoreResult<()>;
}

impl ExpenseStore for ExpenseRepository {
    async fn insert(&self, new: NewExpense) -> StoreResult<Expense> {
        self.insert(new).await
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Expense>> {
        self.find_by_id(id).await
    }

    async fn list_all(&self, limit: i64, offset: i64) -> StoreResult<Vec<Expense>> {
        self.list_all(limit, offset).await
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>> {
        self.list_for_user(user_id, limit, offset).await
    }

    async fn list_for_account(
        &self,
        account_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>> {
        self.list_for_account(account_id, limit, offset).await
    }

    async fn list_for_category(
        &self,
        category_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>> {
        self.list_for_category(category_id, limit, offset).await
    }

    async fn list_for_account_category(
        &self,
        account_id: i64,
        category_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>> {
        self.list_for_account_category(account_id, category_id, limit, offset)
            .await
    }

    async fn update(&self, id: i64, changes: ExpenseUpdate) -> StoreResult<Expense> {
        self.update(id, changes).await
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.delete(id).await
    }
}

impl ExpenseStore for MockExpenseStore {
    async fn insert(&self, new: NewExpense) -> StoreResult<Expense> {
        self.insert(new).await
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Expense>> {
        self.find_by_id(id).await
    }

    async fn list_all(&self, limit: i64, offset: i64) -> StoreResult<Vec<Expense>> {
        self.list_all(limit, offset).await
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>> {
        self.list_for_user(user_id, limit, offset).await
    }

    async fn list_for_account(
        &self,
        account_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>> {
        self.list_for_account(account_id, limit, offset).await
    }

    async fn list_for_category(
        &self,
        category_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>> {
        self.list_for_category(category_id, limit, offset).await
    }

    async fn list_for_account_category(
        &self,
        account_id: i64,
        category_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>> {
        self.list_for_account_category(account_id, category_id, limit, offset)
            .await
    }

    async fn update(&self, id: i64, changes: ExpenseUpdate) -> StoreResult<Expense> {
        self.update(id, changes).await
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.delete(id).await
    }
}
