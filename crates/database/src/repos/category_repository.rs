//! Category repository for database operations.

use crate::entities::{Category, NewCategory};
use crate::types::{StoreError, StoreResult};
use chrono::Utc;
use sqlx::SqlitePool;

const CATEGORY_COLUMNS: &str = "id, user_id, name, created_at, updated_at";

/// Repository for category database operations
#[derive(Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new category row and return it
    pub async fn insert(&self, new: NewCategory) -> StoreResult<Category> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO categories (user_id, name, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(new.user_id)
        .bind(&new.name)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                StoreError::Duplicate("category name")
            } else {
                StoreError::Database(e)
            }
        })?;

        let category_id = result.last_insert_rowid();

        self.find_by_id(category_id)
            .await?
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))
    }

    /// Find category by ID
    pub async fn find_by_id(&self, id: i64) -> StoreResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Find a user's category by its exact name
    pub async fn find_by_name(&self, user_id: i64, name: &str) -> StoreResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE user_id = ? AND name = ?"
        ))
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// List a user's categories in insertion order
    pub async fn list_for_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE user_id = ? ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Delete a category row; expenses keep their rows with the category cleared
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
