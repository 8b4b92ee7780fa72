pub mod account;
pub mod advice;
pub mod category;
pub mod error;
pub mod expense;
pub mod mock_stores;
pub mod paging;
pub mod user;

#[cfg(test)]
pub mod test_support;

pub use error::*;
