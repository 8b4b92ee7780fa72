//! User repository for database operations.

use crate::entities::{NewUser, User, UserUpdate};
use crate::types::{StoreError, StoreResult};
use chrono::Utc;
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, email, full_name, password_hash, created_at, updated_at";

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user row and return it
    pub async fn insert(&self, new: NewUser) -> StoreResult<User> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO users (email, full_name, password_hash, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&new.email)
        .bind(&new.full_name)
        .bind(&new.password_hash)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                StoreError::Duplicate("email")
            } else {
                StoreError::Database(e)
            }
        })?;

        let user_id = result.last_insert_rowid();

        self.find_by_id(user_id)
            .await?
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Apply a partial update and return the fresh row
    pub async fn update(&self, id: i64, changes: UserUpdate) -> StoreResult<User> {
        let mut sets = Vec::new();
        if changes.email.is_some() {
            sets.push("email = ?");
        }
        if changes.full_name.is_some() {
            sets.push("full_name = ?");
        }
        if changes.password_hash.is_some() {
            sets.push("password_hash = ?");
        }

        if sets.is_empty() {
            return self.find_by_id(id).await?.ok_or(StoreError::NotFound);
        }

        sets.push("updated_at = ?");
        let sql = format!("UPDATE users SET {} WHERE id = ?", sets.join(", "));
        let now = Utc::now().to_rfc3339();

        let mut query = sqlx::query(&sql);
        if let Some(ref email) = changes.email {
            query = query.bind(email);
        }
        if let Some(ref full_name) = changes.full_name {
            query = query.bind(full_name);
        }
        if let Some(ref password_hash) = changes.password_hash {
            query = query.bind(password_hash);
        }

        let result = query
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.to_string().contains("UNIQUE constraint failed") {
                    StoreError::Duplicate("email")
                } else {
                    StoreError::Database(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        self.find_by_id(id).await?.ok_or(StoreError::NotFound)
    }

    /// Delete a user row; child accounts, categories, and expenses cascade
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
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
    use crate::migrations::run_migrations;
    use spendlog_config::DatabaseConfig;
    use tempfile::TempDir;

    async fn create_test_pool() -> (SqlitePool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 1,
        };

        let pool = prepare_database(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        (pool, temp_dir)
    }

    fn sample_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            full_name: "Test User".to_string(),
            password_hash: "not-a-real-hash".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_and_find_round_trip() {
        let (pool, _dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let created = repo.insert(sample_user("test@example.com")).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.email, "test@example.com");

        let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id, created);

        let by_email = repo.find_by_email("test@example.com").await.unwrap();
        assert_eq!(by_email.as_ref().map(|u| u.id), Some(created.id));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let (pool, _dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        repo.insert(sample_user("dup@example.com")).await.unwrap();
        let result = repo.insert(sample_user("dup@example.com")).await;

        assert!(matches!(result, Err(StoreError::Duplicate("email"))));
    }

    #[tokio::test]
    async fn update_changes_only_provided_fields() {
        let (pool, _dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let user = repo.insert(sample_user("update@example.com")).await.unwrap();

        let updated = repo
            .update(
                user.id,
                UserUpdate {
                    full_name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.full_name, "Renamed");
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.password_hash, user.password_hash);
    }

    #[tokio::test]
    async fn update_without_fields_returns_current_row() {
        let (pool, _dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let user = repo.insert(sample_user("noop@example.com")).await.unwrap();
        let updated = repo.update(user.id, UserUpdate::default()).await.unwrap();

        assert_eq!(updated, user);
    }

    #[tokio::test]
    async fn update_missing_user_reports_not_found() {
        let (pool, _dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let result = repo
            .update(
                4242,
                UserUpdate {
                    full_name: Some("Ghost".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn delete_missing_user_reports_not_found() {
        let (pool, _dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let result = repo.delete(999).await;
        assert!(matches!(result, Err(StoreError::NotFound)));
    }
}
