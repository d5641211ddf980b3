use actix_web::web;

use crate::models::ServiceError;

pub mod auth;
pub mod overtime;
pub mod setup;
pub mod users;

// Re-export all handler functions for easy importing
pub use auth::*;
pub use overtime::*;
pub use setup::*;
pub use users::*;

/// Route table shared by the server and the integration tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/api/login", web::post().to(login_api))
        .route("/api/logout", web::post().to(logout_api))
        .route("/api/me", web::get().to(me_api))
        .route("/api/overtime", web::post().to(create_overtime))
        .route("/api/overtime", web::get().to(list_overtime))
        .route("/api/overtime/calculate", web::post().to(calculate_overtime))
        .route("/api/overtime/{id}", web::delete().to(delete_overtime))
        .route("/api/users", web::post().to(create_user_api))
        .route("/api/users", web::get().to(list_users))
        .route("/api/users/{id}", web::put().to(update_user))
        .route("/api/users/{id}/overtime", web::get().to(list_user_overtime))
        .route("/api/setup/status", web::get().to(setup_status))
        .route("/api/setup/first-admin", web::post().to(create_first_admin));
}

/// Malformed or missing JSON bodies answer with the same error body as every other failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ServiceError::ValidationFailed(format!("Invalid request body: {}", err)).into()
    })
}
