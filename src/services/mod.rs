pub mod account_service;
pub mod bootstrap_service;
pub mod overtime_service;

pub use account_service::*;
pub use bootstrap_service::*;
pub use overtime_service::*;
