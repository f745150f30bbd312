//! Row source for pii-log
//!
//! This crate provides:
//! - `UserStore`, a MySQL or SQLite connection to the `users` table
//! - `UserRow` and its `field=value;` rendering
//! - `log_users`, which streams rows through a redacting logger

pub mod db;
pub mod error;
pub mod models;
pub mod source;

pub use db::{USERS_QUERY, UserStore};
pub use error::{Result, StoreError};
pub use models::UserRow;
pub use source::{RowSource, log_users};
