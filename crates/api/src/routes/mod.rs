pub mod accounts;
pub mod advice;
pub mod auth;
pub mod categories;
pub mod expenses;
pub mod health;
pub mod models;
pub mod users;
