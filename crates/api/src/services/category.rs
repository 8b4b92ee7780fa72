//! Spending-label management. Category names are unique per owner.

use spendlog_database::{Category, CategoryRepository, NewCategory, StoreResult, User};
use sqlx::SqlitePool;
use tracing::info;

use super::error::ServiceError;
use super::mock_stores::MockCategoryStore;
use super::paging::page_window;

/// Service for managing categories
#[derive(Clone)]
pub struct CategoryService<R> {
    categories: R,
}

impl CategoryService<CategoryRepository> {
    /// Create a category service backed by the real database repository
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            categories: CategoryRepository::new(pool),
        }
    }
}

impl CategoryService<MockCategoryStore> {
    /// Create a category service for testing
    pub fn new_for_testing() -> Self {
        Self {
            categories: MockCategoryStore::new(),
        }
    }
}

impl<R> CategoryService<R>
where
    R: CategoryStore,
{
    /// Create a category owned by the actor.
    pub async fn create(&self, actor: &User, name: String) -> Result<Category, ServiceError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ServiceError::invalid_argument(
                "category name cannot be empty",
            ));
        }

        if self
            .categories
            .find_by_name(actor.id, &name)
            .await?
            .is_some()
        {
            return Err(ServiceError::conflict("category name is already taken"));
        }

        let category = self
            .categories
            .insert(NewCategory {
                user_id: actor.id,
                name,
            })
            .await?;

        info!(category_id = category.id, user_id = actor.id, "created category");

        Ok(category)
    }

    /// Fetch one category. Absent rows are reported before foreign ones.
    pub async fn get(&self, actor: &User, category_id: i64) -> Result<Category, ServiceError> {
        let category = self
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        if category.user_id != actor.id {
            return Err(ServiceError::Forbidden);
        }

        Ok(category)
    }

    /// Look a category up by its exact name within the actor's labels.
    pub async fn get_by_name(&self, actor: &User, name: &str) -> Result<Category, ServiceError> {
        self.categories
            .find_by_name(actor.id, name)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// List the actor's categories, oldest first.
    pub async fn list(
        &self,
        actor: &User,
        page: i64,
        per_page: i64,
    ) -> Result<Vec<Category>, ServiceError> {
        let (limit, offset) = page_window(page, per_page)?;
        Ok(self
            .categories
            .list_for_user(actor.id, limit, offset)
            .await?)
    }

    /// Delete a category the actor owns. Expenses keep their rows and
    /// merely lose the label.
    pub async fn delete(&self, actor: &User, category_id: i64) -> Result<(), ServiceError> {
        self.get(actor, category_id).await?;
        self.categories.delete(category_id).await?;

        info!(category_id, user_id = actor.id, "deleted category");

        Ok(())
    }
}

/// Trait for category stores to allow generic usage
pub trait CategoryStore {
    async fn insert(&self, new: NewCategory) -> StoreResult<Category>;
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Category>>;
    async fn find_by_name(&self, user_id: i64, name: &str) -> StoreResult<Option<Category>>;
    async fn list_for_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Category>>;
    async fn delete(&self, id: i64) -> StoreResult<()>;
}

impl CategoryStore for CategoryRepository {
    async fn insert(&self, new: NewCategory) -> StoreResult<Category> {
        self.insert(new).await
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Category>> {
        self.find_by_id(id).await
    }

    async fn find_by_name(&self, user_id: i64, name: &str) -> StoreResult<Option<Category>> {
        self.find_by_name(user_id, name).await
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Category>> {
        self.list_for_user(user_id, limit, offset).await
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.delete(id).await
    }
}

impl CategoryStore for MockCategoryStore {
    async fn insert(&self, new: NewCategory) -> StoreResult<Category> {
        self.insert(new).await
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Category>> {
        self.find_by_id(id).await
    }

    async fn find_by_name(&self, user_id: i64, name: &str) -> StoreResult<Option<Category>> {
        self.find_by_name(user_id, name).await
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Category>> {
        self.list_for_user(user_id, limit, offset).await
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.delete(id).await
    }
}
