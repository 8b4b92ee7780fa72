//! Mock store implementations for exercising service logic without SQLite.
//!
//! Each mock mirrors the error behaviour of its repository counterpart:
//! duplicate keys, missing rows on update/delete, and the ordering of
//! list results.

use std::collections::HashMap;
use std::sync::Arc;

use spendlog_database::{
    Account, AccountUpdate, Category, Expense, ExpenseUpdate, NewAccount, NewCategory, NewExpense,
    NewUser, StoreError, StoreResult, User, UserUpdate,
};
use tokio::sync::RwLock;

/// Mock user store for testing
#[derive(Clone)]
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<i64, User>>>,
    next_id: Arc<RwLock<i64>>,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(RwLock::new(1)),
        }
    }

    pub async fn insert(&self, new: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == new.email) {
            return Err(StoreError::Duplicate("email"));
        }

        let mut next_id = self.next_id.write().await;
        let user_id = *next_id;
        *next_id += 1;

        let now = chrono::Utc::now().to_rfc3339();
        let user = User {
            id: user_id,
            email: new.email,
            full_name: new.full_name,
            password_hash: new.password_hash,
            created_at: now.clone(),
            updated_at: now,
        };
        users.insert(user_id, user.clone());

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    pub async fn update(&self, id: i64, changes: UserUpdate) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if let Some(ref email) = changes.email {
            if users.values().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::Duplicate("email"));
            }
        }

        let user = users.get_mut(&id).ok_or(StoreError::NotFound)?;
        let untouched = changes.email.is_none()
            && changes.full_name.is_none()
            && changes.password_hash.is_none();
        if untouched {
            return Ok(user.clone());
        }

        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(full_name) = changes.full_name {
            user.full_name = full_name;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        user.updated_at = chrono::Utc::now().to_rfc3339();

        Ok(user.clone())
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut users = self.users.write().await;
        users.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

impl Default for MockUserStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock account store for testing
#[derive(Clone)]
pub struct MockAccountStore {
    accounts: Arc<RwLock<HashMap<i64, Account>>>,
    next_id: Arc<RwLock<i64>>,
}

impl MockAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(RwLock::new(1)),
        }
    }

    pub async fn insert(&self, new: NewAccount) -> StoreResult<Account> {
        let mut next_id = self.next_id.write().await;
        let account_id = *next_id;
        *next_id += 1;

        let now = chrono::Utc::now().to_rfc3339();
        let account = Account {
            id: account_id,
            user_id: new.user_id,
            currency_id: new.currency_id,
            name: new.name,
            initial_amount: new.initial_amount,
            created_at: now.clone(),
            updated_at: now,
        };

        let mut accounts = self.accounts.write().await;
        accounts.insert(account_id, account.clone());

        Ok(account)
    }

    pub async fn find_by_id(&self, id: i64) -> StoreResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    pub async fn list_for_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Account>> {
        let accounts = self.accounts.read().await;
        let mut rows: Vec<Account> = accounts
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.id);
        Ok(window(rows, limit, offset))
    }

    pub async fn update(&self, id: i64, changes: AccountUpdate) -> StoreResult<Account> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(&id).ok_or(StoreError::NotFound)?;

        let untouched = changes.name.is_none()
            && changes.currency_id.is_none()
            && changes.initial_amount.is_none();
        if untouched {
            return Ok(account.clone());
        }

        if let Some(name) = changes.name {
            account.name = name;
        }
        if let Some(currency_id) = changes.currency_id {
            account.currency_id = currency_id;
        }
        if let Some(initial_amount) = changes.initial_amount {
            account.initial_amount = initial_amount;
        }
        account.updated_at = chrono::Utc::now().to_rfc3339();

        Ok(account.clone())
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut accounts = self.accounts.write().await;
        accounts.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

impl Default for MockAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock category store for testing
#[derive(Clone)]
pub struct MockCategoryStore {
    categories: Arc<RwLock<HashMap<i64, Category>>>,
    next_id: Arc<RwLock<i64>>,
}

impl MockCategoryStore {
    pub fn new() -> Self {
        Self {
            categories: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(RwLock::new(1)),
        }
    }

    pub async fn insert(&self, new: NewCategory) -> StoreResult<Category> {
        let mut categories = self.categories.write().await;
        if categories
            .values()
            .any(|c| c.user_id == new.user_id && c.name == new.name)
        {
            return Err(StoreError::Duplicate("category name"));
        }

        let mut next_id = self.next_id.write().await;
        let category_id = *next_id;
        *next_id += 1;

        let now = chrono::Utc::now().to_rfc3339();
        let category = Category {
            id: category_id,
            user_id: new.user_id,
            name: new.name,
            created_at: now.clone(),
            updated_at: now,
        };
        categories.insert(category_id, category.clone());

        Ok(category)
    }

    pub async fn find_by_id(&self, id: i64) -> StoreResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.get(&id).cloned())
    }

    pub async fn find_by_name(&self, user_id: i64, name: &str) -> StoreResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories
            .values()
            .find(|c| c.user_id == user_id && c.name == name)
            .cloned())
    }

    pub async fn list_for_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Category>> {
        let categories = self.categories.read().await;
        let mut rows: Vec<Category> = categories
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.id);
        Ok(window(rows, limit, offset))
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut categories = self.categories.write().await;
        categories
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

impl Default for MockCategoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock expense store for testing
#[derive(Clone)]
pub struct MockExpenseStore {
    expenses: Arc<RwLock<HashMap<i64, Expense>>>,
    next_id: Arc<RwLock<i64>>,
}

impl MockExpenseStore {
    pub fn new() -> Self {
        Self {
            expenses: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(RwLock::new(1)),
        }
    }

    pub async fn insert(&self, new: NewExpense) -> StoreResult<Expense> {
        let mut next_id = self.next_id.write().await;
        let expense_id = *next_id;
        *next_id += 1;

        let now = chrono::Utc::now().to_rfc3339();
        let expense = Expense {
            id: expense_id,
            user_id: new.user_id,
            account_id: new.account_id,
            category_id: new.category_id,
            name: new.name,
            description: new.description,
            amount: new.amount,
            created_at: now.clone(),
            updated_at: now,
        };

        let mut expenses = self.expenses.write().await;
        expenses.insert(expense_id, expense.clone());

        Ok(expense)
    }

    pub async fn find_by_id(&self, id: i64) -> StoreResult<Option<Expense>> {
        let expenses = self.expenses.read().await;
        Ok(expenses.get(&id).cloned())
    }

    pub async fn list_all(&self, limit: i64, offset: i64) -> StoreResult<Vec<Expense>> {
        let expenses = self.expenses.read().await;
        Ok(newest_first(expenses.values().cloned().collect(), limit, offset))
    }

    pub async fn list_for_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>> {
        let expenses = self.expenses.read().await;
        let rows = expenses
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, limit, offset))
    }

    pub async fn list_for_account(
        &self,
        account_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>> {
        let expenses = self.expenses.read().await;
        let rows = expenses
            .values()
            .filter(|e| e.account_id == account_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, limit, offset))
    }

    pub async fn list_for_category(
        &self,
        category_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>> {
        let expenses = self.expenses.read().await;
        let rows = expenses
            .values()
            .filter(|e| e.category_id == Some(category_id))
            .cloned()
            .collect();
        Ok(newest_first(rows, limit, offset))
    }

    pub async fn list_for_account_category(
        &self,
        account_id: i64,
        category_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Expense>> {
        let expenses = self.expenses.read().await;
        let rows = expenses
            .values()
            .filter(|e| e.account_id == account_id && e.category_id == Some(category_id))
            .cloned()
            .collect();
        Ok(newest_first(rows, limit, offset))
    }

    pub async fn update(&self, id: i64, changes: ExpenseUpdate) -> StoreResult<Expense> {
        let mut expenses = self.expenses.write().await;
        let expense = expenses.get_mut(&id).ok_or(StoreError::NotFound)?;

        let untouched = changes.name.is_none()
            && changes.description.is_none()
            && changes.amount.is_none()
            && changes.category_id.is_none();
        if untouched {
            return Ok(expense.clone());
        }

        if let Some(name) = changes.name {
            expense.name = name;
        }
        if let Some(description) = changes.description {
            expense.description = description;
        }
        if let Some(amount) = changes.amount {
            expense.amount = amount;
        }
        if let Some(category_id) = changes.category_id {
            expense.category_id = Some(category_id);
        }
        expense.updated_at = chrono::Utc::now().to_rfc3339();

        Ok(expense.clone())
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut expenses = self.expenses.write().await;
        expenses.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

impl Default for MockExpenseStore {
    fn default() -> Self {
        Self::new()
    }
}

fn window<T>(rows: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    rows.into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}

fn newest_first(mut rows: Vec<Expense>, limit: i64, offset: i64) -> Vec<Expense> {
    rows.sort_by_key(|e| std::cmp::Reverse(e.id));
    window(rows, limit, offset)
}
