// Re-export all models organized by domain
pub mod api;
pub mod errors;
pub mod overtime;
pub mod user;

pub use api::*;
pub use errors::*;
pub use overtime::*;
pub use user::*;
