//! Account repository for database operations.

use crate::entities::{Account, AccountUpdate, NewAccount};
use crate::types::{StoreError, StoreResult};
use chrono::Utc;
use sqlx::SqlitePool;

const ACCOUNT_COLUMNS: &str =
    "id, user_id, currency_id, name, initial_amount, created_at, updated_at";

/// Repository for account database operations
#[derive(Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    /// Create a new account repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account row and return it
    pub async fn insert(&self, new: NewAccount) -> StoreResult<Account> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO accounts (user_id, currency_id, name, initial_amount, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(new.user_id)
        .bind(new.currency_id)
        .bind(&new.name)
        .bind(new.initial_amount)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let account_id = result.last_insert_rowid();

        self.find_by_id(account_id)
            .await?
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))
    }

    /// Find account by ID
    pub async fn find_by_id(&self, id: i64) -> StoreResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// List a user's accounts in insertion order
    pub async fn list_for_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE user_id = ? ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    /// Apply a partial update and return the fresh row
    pub async fn update(&self, id: i64, changes: AccountUpdate) -> StoreResult<Account> {
        let mut sets = Vec::new();
        if changes.name.is_some() {
            sets.push("name = ?");
        }
        if changes.currency_id.is_some() {
            sets.push("currency_id = ?");
        }
        if changes.initial_amount.is_some() {
            sets.push("initial_amount = ?");
        }

        if sets.is_empty() {
            return self.find_by_id(id).await?.ok_or(StoreError::NotFound);
        }

        sets.push("updated_at = ?");
        let sql = format!("UPDATE accounts SET {} WHERE id = ?", sets.join(", "));
        let now = Utc::now().to_rfc3339();

        let mut query = sqlx::query(&sql);
        if let Some(ref name) = changes.name {
            query = query.bind(name);
        }
        if let Some(currency_id) = changes.currency_id {
            query = query.bind(currency_id);
        }
        if let Some(initial_amount) = changes.initial_amount {
            query = query.bind(initial_amount);
        }

        let result = query.bind(&now).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        self.find_by_id(id).await?.ok_or(StoreError::NotFound)
    }

    /// Delete an account row; its expenses cascade
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
