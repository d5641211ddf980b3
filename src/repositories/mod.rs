pub mod account_repository;
pub mod overtime_repository;
pub mod privileged_store;
pub mod role_repository;

pub use account_repository::{AccountRepository, SqliteAccountRepository};
pub use overtime_repository::*;
pub use privileged_store::*;
pub use role_repository::*;
