//! Database repository implementations

pub mod account_repository;
pub mod category_repository;
pub mod expense_repository;
pub mod user_repository;

// Re-export all repositories for convenience
pub use account_repository::*;
pub use category_repository::*;
pub use expense_repository::*;
pub use user_repository::*;
