use actix_web::{web, HttpResponse, Result};

use crate::models::{ErrorResponse, FirstAdminResponse, ServiceError, SetupStatusResponse};
use crate::services::BootstrapService;

#[utoipa::path(
    get,
    path = "/api/setup/status",
    responses(
        (status = 200, description = "Whether an administrator exists", body = SetupStatusResponse)
    ),
    security()
)]
pub async fn setup_status(
    bootstrap_service: web::Data<BootstrapService>,
) -> Result<HttpResponse, ServiceError> {
    let admin_exists = bootstrap_service.admin_exists().await?;

    Ok(HttpResponse::Ok().json(SetupStatusResponse {
        success: true,
        admin_exists,
    }))
}

#[utoipa::path(
    post,
    path = "/api/setup/first-admin",
    responses(
        (status = 200, description = "Administrator created", body = FirstAdminResponse),
        (status = 409, description = "Admin user already exists", body = ErrorResponse),
        (status = 500, description = "Creation failed", body = ErrorResponse)
    ),
    security()
)]
pub async fn create_first_admin(
    bootstrap_service: web::Data<BootstrapService>,
) -> Result<HttpResponse, ServiceError> {
    let email = bootstrap_service.create_first_admin().await?;

    Ok(HttpResponse::Ok().json(FirstAdminResponse {
        success: true,
        message: "Admin user created successfully".to_string(),
        email,
    }))
}
