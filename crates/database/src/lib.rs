//! spendlog Database Crate
//!
//! This crate provides database functionality for the spendlog application,
//! including connection management, migrations, and repository implementations.

use spendlog_config::DatabaseConfig;
use sqlx::SqlitePool;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::{run_migrations, MIGRATOR};

// Re-export repositories
pub use repos::{AccountRepository, CategoryRepository, ExpenseRepository, UserRepository};

// Re-export entities
pub use entities::{
    account::{Account, AccountUpdate, NewAccount},
    category::{Category, NewCategory},
    expense::{Expense, ExpenseUpdate, NewExpense},
    user::{NewUser, User, UserUpdate},
};

// Re-export types
pub use types::{errors::StoreError, StoreResult};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let pool = prepare_database(config).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
