//! Expense repository for database operations.

use crate::entities::{Expense, ExpenseUpdate, NewExpense};
use crate::types::{StoreError, StoreResult};
use chrono::Utc;
use sqlx::SqlitePool;

const EXPENSE_COLUMNS: &str =
    "id, user_id, account_id, category_id, name, description, amount, created_at, updated_at";

/// Repository for expense database operations.
///
/// Listings return newest rows first so that the first page is the most
/// recent spending.
#[derive(Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new expense row and return it
    pub async fn insert(&self, new: NewExpense) -> StoreResult<Expense> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO expenses (user_id, account_id, category_id, name, description, amount, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(new.user_id)
        .bind(new.account_id)
        .bind(new.category_id)
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.amount)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let expense_id = result.last_insert_rowid();

        self.find_by_id(expense_id)
            .await?
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))
    }

    /// Find expense by ID
    pub async fn find_by_id(&self, id: i64) -> StoreResult<Option<Expense>> {
        let expense = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(expense)
    }

    /// List expenses across all users
    pub async fn list_all(&self, limit: i64, offset: i64) -> StoreResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses ORDER BY id DESC LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// List a user's expenses, newest first
    pub async fn list_for_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE user_id = ? ORDER BY id DESC LIMIT ? OFFSET ?"
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// List the expenses recorded against one account
    pub async fn list_for_account(
        &self,
        account_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE account_id = ? ORDER BY id DESC LIMIT ? OFFSET ?"
        ))
        .bind(account_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// List the expenses labelled with one category
    pub async fn list_for_category(
        &self,
        category_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE category_id = ? ORDER BY id DESC LIMIT ? OFFSET ?"
        ))
        .bind(category_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// List the expenses for one account further narrowed to one category
    pub async fn list_for_account_category(
        &self,
        account_id: i64,
        category_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE account_id = ? AND category_id = ? ORDER BY id DESC LIMIT ? OFFSET ?"
        ))
        .bind(account_id)
        .bind(category_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// Apply a partial update and return the fresh row
    pub async fn update(&self, id: i64, changes: ExpenseUpdate) -> StoreResult<Expense> {
        let mut sets = Vec::new();
        if changes.name.is_some() {
            sets.push("name = ?");
        }
        if changes.description.is_some() {
            sets.push("description = ?");
        }
        if changes.amount.is_some() {
            sets.push("amount = ?");
        }
        if changes.category_id.is_some() {
            sets.push("category_id = ?");
        }

        if sets.is_empty() {
            return self.find_by_id(id).await?.ok_or(StoreError::NotFound);
        }

        sets.push("updated_at = ?");
        let sql = format!("UPDATE expenses SET {} WHERE id = ?", sets.join(", "));
        let now = Utc::now().to_rfc3339();

        let mut query = sqlx::query(&sql);
        if let Some(ref name) = changes.name {
            query = query.bind(name);
        }
        if let Some(ref description) = changes.description {
            query = query.bind(description);
        }
        if let Some(amount) = changes.amount {
            query = query.bind(amount);
        }
        if let Some(category_id) = changes.category_id {
            query = query.bind(category_id);
        }

        let result = query.bind(&now).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        self.find_by_id(id).await?.ok_or(StoreError::NotFound)
    }

    /// Delete an expense row
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::prepare_database;
    use crate::entities::{NewAccount, NewCategory, NewUser};
    use crate::migrations::run_migrations;
    use crate::repos::{AccountRepository, CategoryRepository, UserRepository};
    use spendlog_config::DatabaseConfig;
    use tempfile::TempDir;

    struct Fixture {
        pool: SqlitePool,
        user_id: i64,
        account_id: i64,
        category_id: i64,
        _dir: TempDir,
    }

    async fn create_fixture() -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 1,
        };

        let pool = prepare_database(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let user_id = UserRepository::new(pool.clone())
            .insert(NewUser {
                email: "spender@example.com".to_string(),
                full_name: "Spender".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap()
            .id;

        let account_id = AccountRepository::new(pool.clone())
            .insert(NewAccount {
                user_id,
                currency_id: 1,
                name: "Checking".to_string(),
                initial_amount: 100_000,
            })
            .await
            .unwrap()
            .id;

        let category_id = CategoryRepository::new(pool.clone())
            .insert(NewCategory {
                user_id,
                name: "Groceries".to_string(),
            })
            .await
            .unwrap()
            .id;

        Fixture {
            pool,
            user_id,
            account_id,
            category_id,
            _dir: temp_dir,
        }
    }

    fn sample_expense(fixture: &Fixture, name: &str, amount: i64) -> NewExpense {
        NewExpense {
            user_id: fixture.user_id,
            account_id: fixture.account_id,
            category_id: Some(fixture.category_id),
            name: name.to_string(),
            description: String::new(),
            amount,
        }
    }

    #[tokio::test]
    async fn insert_and_find_round_trip() {
        let fixture = create_fixture().await;
        let repo = ExpenseRepository::new(fixture.pool.clone());

        let created = repo
            .insert(sample_expense(&fixture, "Milk", 350))
            .await
            .unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.category_id, Some(fixture.category_id));
    }

    #[tokio::test]
    async fn listings_return_newest_first() {
        let fixture = create_fixture().await;
        let repo = ExpenseRepository::new(fixture.pool.clone());

        for (name, amount) in [("First", 100), ("Second", 200), ("Third", 300)] {
            repo.insert(sample_expense(&fixture, name, amount))
                .await
                .unwrap();
        }

        let expenses = repo.list_for_user(fixture.user_id, 2, 0).await.unwrap();
        let names: Vec<_> = expenses.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Third", "Second"]);

        let all = repo.list_all(10, 0).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "Third");
    }

    #[tokio::test]
    async fn account_and_category_filters_narrow_results() {
        let fixture = create_fixture().await;
        let repo = ExpenseRepository::new(fixture.pool.clone());

        repo.insert(sample_expense(&fixture, "Labelled", 500))
            .await
            .unwrap();
        repo.insert(NewExpense {
            category_id: None,
            ..sample_expense(&fixture, "Unlabelled", 700)
        })
        .await
        .unwrap();

        let by_account = repo
            .list_for_account(fixture.account_id, 10, 0)
            .await
            .unwrap();
        assert_eq!(by_account.len(), 2);

        let by_category = repo
            .list_for_category(fixture.category_id, 10, 0)
            .await
            .unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].name, "Labelled");

        let narrowed = repo
            .list_for_account_category(fixture.account_id, fixture.category_id, 10, 0)
            .await
            .unwrap();
        assert_eq!(narrowed.len(), 1);
    }

    #[tokio::test]
    async fn deleting_category_clears_expense_label() {
        let fixture = create_fixture().await;
        let repo = ExpenseRepository::new(fixture.pool.clone());

        let expense = repo
            .insert(sample_expense(&fixture, "Bread", 250))
            .await
            .unwrap();

        CategoryRepository::new(fixture.pool.clone())
            .delete(fixture.category_id)
            .await
            .unwrap();

        let reloaded = repo.find_by_id(expense.id).await.unwrap().unwrap();
        assert_eq!(reloaded.category_id, None);
    }

    #[tokio::test]
    async fn deleting_account_removes_its_expenses() {
        let fixture = create_fixture().await;
        let repo = ExpenseRepository::new(fixture.pool.clone());

        let expense = repo
            .insert(sample_expense(&fixture, "Rent", 90_000))
            .await
            .unwrap();

        AccountRepository::new(fixture.pool.clone())
            .delete(fixture.account_id)
            .await
            .unwrap();

        let reloaded = repo.find_by_id(expense.id).await.unwrap();
        assert!(reloaded.is_none());
    }

    #[tokio::test]
    async fn update_relabels_expense() {
        let fixture = create_fixture().await;
        let repo = ExpenseRepository::new(fixture.pool.clone());

        let expense = repo
            .insert(NewExpense {
                category_id: None,
                ..sample_expense(&fixture, "Dinner", 4_200)
            })
            .await
            .unwrap();

        let updated = repo
            .update(
                expense.id,
                ExpenseUpdate {
                    amount: Some(4_500),
                    category_id: Some(fixture.category_id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.amount, 4_500);
        assert_eq!(updated.category_id, Some(fixture.category_id));
        assert_eq!(updated.name, "Dinner");
    }

    #[tokio::test]
    async fn delete_missing_expense_reports_not_found() {
        let fixture = create_fixture().await;
        let repo = ExpenseRepository::new(fixture.pool);

        let result = repo.delete(31337).await;
        assert!(matches!(result, Err(StoreError::NotFound)));
    }
}
