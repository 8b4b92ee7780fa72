//! Money-container management scoped to the owning user.

use spendlog_database::{Account, AccountRepository, AccountUpdate, NewAccount, StoreResult, User};
use sqlx::SqlitePool;
use tracing::info;

use super::error::ServiceError;
use super::mock_stores::MockAccountStore;
use super::paging::page_window;

/// Payload accepted by [`AccountService::create`].
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub currency_id: i64,
    pub name: String,
    pub initial_amount: i64,
}

/// Service for managing accounts
#[derive(Clone)]
pub struct AccountService<R> {
    accounts: R,
}

impl AccountService<AccountRepository> {
    /// Create an account service backed by the real database repository
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            accounts: AccountRepository::new(pool),
        }
    }
}

impl AccountService<MockAccountStore> {
    /// Create an account service for testing
    pub fn new_for_testing() -> Self {
        Self {
            accounts: MockAccountStore::new(),
        }
    }
}

impl<R> AccountService<R>
where
    R: AccountStore,
{
    /// Open a new account owned by the actor.
    pub async fn create(&self, actor: &User, create: CreateAccount) -> Result<Account, ServiceError> {
        if create.name.trim().is_empty() {
            return Err(ServiceError::invalid_argument("account name cannot be empty"));
        }

        let account = self
            .accounts
            .insert(NewAccount {
                user_id: actor.id,
                currency_id: create.currency_id,
                name: create.name,
                initial_amount: create.initial_amount,
            })
            .await?;

        info!(account_id = account.id, user_id = actor.id, "created account");

        Ok(account)
    }

    /// Fetch one account. Absent rows are reported before foreign ones.
    pub async fn get(&self, actor: &User, account_id: i64) -> Result<Account, ServiceError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        if account.user_id != actor.id {
            return Err(ServiceError::Forbidden);
        }

        Ok(account)
    }

    /// List the actor's accounts, oldest first.
    pub async fn list(
        &self,
        actor: &User,
        page: i64,
        per_page: i64,
    ) -> Result<Vec<Account>, ServiceError> {
        let (limit, offset) = page_window(page, per_page)?;
        Ok(self.accounts.list_for_user(actor.id, limit, offset).await?)
    }

    /// Apply changes to an account the actor owns.
    pub async fn update(
        &self,
        actor: &User,
        account_id: i64,
        changes: AccountUpdate,
    ) -> Result<Account, ServiceError> {
        self.get(actor, account_id).await?;

        if let Some(ref name) = changes.name {
            if name.trim().is_empty() {
                return Err(ServiceError::invalid_argument("account name cannot be empty"));
            }
        }

        Ok(self.accounts.update(account_id, changes).await?)
    }

    /// Delete an account the actor owns; its expenses go with it.
    pub async fn delete(&self, actor: &User, account_id: i64) -> Result<(), ServiceError> {
        self.get(actor, account_id).await?;
        self.accounts.delete(account_id).await?;

        info!(account_id, user_id = actor.id, "deleted account");

        Ok(())
    }
}

/// Trait for account stores to allow generic usage
pub trait AccountStore {
    async fn insert(&self, new: NewAccount) -> StoreResult<Account>;
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Account>>;
    async fn list_for_user(&self, user_id: i64, limit: i64, offset: i64)
        -> StoreResult<Vec<Account>>;
    async fn update(&self, id: i64, changes: AccountUpdate) -> StoreResult<Account>;
    async fn delete(&self, id: i64) -> StoreResult<()>;
}

impl AccountStore for AccountRepository {
    async fn insert(&self, new: NewAccount) -> StoreResult<Account> {
        self.insert(new).await
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Account>> {
        self.find_by_id(id).await
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Account>> {
        self.list_for_user(user_id, limit, offset).await
    }

    async fn update(&self, id: i64, changes: AccountUpdate) -> StoreResult<Account> {
        self.update(id, changes).await
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.delete(id).await
    }
}

impl AccountStore for MockAccountStore {
    async fn insert(&self, new: NewAccount) -> StoreResult<Account> {
        self.insert(new).await
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Account>> {
        self.find_by_id(id).await
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Account>> {
        self.list_for_user(user_id, limit, offset).await
    }

    async fn update(&self, id: i64, changes: AccountUpdate) -> StoreResult<Account> {
        self.update(id, changes).await
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.delete(id).await
    }
}
