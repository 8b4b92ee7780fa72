//! Shared types for the storage layer

pub mod errors;

pub use errors::StoreError;

/// Result alias used across the repositories.
pub type StoreResult<T> = Result<T, StoreError>;
