//! Registration and profile management for account holders.

use spendlog_auth::hash_password;
use spendlog_database::{NewUser, StoreResult, User, UserRepository, UserUpdate};
use sqlx::SqlitePool;
use tracing::info;

use super::error::ServiceError;
use super::mock_stores::MockUserStore;

/// Payload accepted by [`UserService::register`].
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

/// Profile changes. Absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub password: Option<String>,
}

/// Service for managing user registration and profiles
#[derive(Clone)]
pub struct UserService<R> {
    users: R,
}

impl UserService<UserRepository> {
    /// Create a user service backed by the real database repository
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }
}

impl UserService<MockUserStore> {
    /// Create a user service for testing
    pub fn new_for_testing() -> Self {
        Self {
            users: MockUserStore::new(),
        }
    }
}

impl<R> UserService<R>
where
    R: UserStore,
{
    /// Register a new user with a freshly hashed password.
    pub async fn register(&self, registration: Registration) -> Result<User, ServiceError> {
        self.validate_email(&registration.email)?;
        self.validate_full_name(&registration.full_name)?;
        self.validate_password(&registration.password)?;

        if self
            .users
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(ServiceError::conflict("email is already registered"));
        }

        let password_hash = hash_password(&registration.password)
            .map_err(|e| ServiceError::internal(format!("password hashing failed: {e}")))?;

        let user = self
            .users
            .insert(NewUser {
                email: registration.email,
                full_name: registration.full_name,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "registered user");

        Ok(user)
    }

    /// Fetch a profile. Users can only read their own row.
    pub async fn get(&self, actor: &User, user_id: i64) -> Result<User, ServiceError> {
        if actor.id != user_id {
            return Err(ServiceError::Forbidden);
        }

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// Apply profile changes. Users can only update their own row.
    pub async fn update(
        &self,
        actor: &User,
        user_id: i64,
        changes: ProfileUpdate,
    ) -> Result<User, ServiceError> {
        if actor.id != user_id {
            return Err(ServiceError::Forbidden);
        }

        if let Some(ref email) = changes.email {
            self.validate_email(email)?;
            if let Some(existing) = self.users.find_by_email(email).await? {
                if existing.id != user_id {
                    return Err(ServiceError::conflict("email is already registered"));
                }
            }
        }
        if let Some(ref full_name) = changes.full_name {
            self.validate_full_name(full_name)?;
        }

        let password_hash = match changes.password {
            Some(ref password) => {
                self.validate_password(password)?;
                let hash = hash_password(password)
                    .map_err(|e| ServiceError::internal(format!("password hashing failed: {e}")))?;
                Some(hash)
            }
            None => None,
        };

        let updated = self
            .users
            .update(
                user_id,
                UserUpdate {
                    email: changes.email,
                    full_name: changes.full_name,
                    password_hash,
                },
            )
            .await?;

        info!(user_id, "updated user profile");

        Ok(updated)
    }

    /// Remove a user and everything they own. Users can only delete themselves.
    pub async fn delete(&self, actor: &User, user_id: i64) -> Result<(), ServiceError> {
        if actor.id != user_id {
            return Err(ServiceError::Forbidden);
        }

        self.users.delete(user_id).await?;

        info!(user_id, "deleted user");

        Ok(())
    }

    // Helper methods for validation

    fn validate_email(&self, email: &str) -> Result<(), ServiceError> {
        if email.trim().is_empty() {
            return Err(ServiceError::invalid_argument("email cannot be empty"));
        }

        if email.len() > 255 {
            return Err(ServiceError::invalid_argument(
                "email too long (max 255 characters)",
            ));
        }

        if !email.contains('@') || !email.contains('.') {
            return Err(ServiceError::invalid_argument("invalid email format"));
        }

        Ok(())
    }

    fn validate_full_name(&self, full_name: &str) -> Result<(), ServiceError> {
        if full_name.trim().is_empty() {
            return Err(ServiceError::invalid_argument("full name cannot be empty"));
        }

        if full_name.len() > 255 {
            return Err(ServiceError::invalid_argument(
                "full name too long (max 255 characters)",
            ));
        }

        Ok(())
    }

    fn validate_password(&self, password: &str) -> Result<(), ServiceError> {
        if password.len() < 8 {
            return Err(ServiceError::invalid_argument(
                "password must be at least 8 characters",
            ));
        }

        Ok(())
    }
}

/// Trait for user stores to allow generic usage
pub trait UserStore {
    async fn insert(&self, new: NewUser) -> StoreResult<User>;
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn update(&self, id: i64, changes: UserUpdate) -> StoreResult<User>;
    async fn delete(&self, id: i64) -> StoreResult<()>;
}

impl UserStore for UserRepository {
    async fn insert(&self, new: NewUser) -> StoreResult<User> {
        self.insert(new).await
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        self.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.find_by_email(email).await
    }

    async fn update(&self, id: i64, changes: UserUpdate) -> StoreResult<User> {
        self.update(id, changes).await
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.delete(id).await
    }
}

impl UserStore for MockUserStore {
    async fn insert(&self, new: NewUser) -> StoreResult<User> {
        self.insert(new).await
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        self.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.find_by_email(email).await
    }

    async fn update(&self, id: i64, changes: UserUpdate) -> StoreResult<User> {
        self.update(id, changes).await
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.delete(id).await
    }
}
