//! Domain entities for the storage layer

pub mod account;
pub mod category;
pub mod expense;
pub mod user;

// Re-export all entity types
pub use account::{Account, AccountUpdate, NewAccount};
pub use category::{Category, NewCategory};
pub use expense::{Expense, ExpenseUpdate, NewExpense};
pub use user::{NewUser, User, UserUpdate};
