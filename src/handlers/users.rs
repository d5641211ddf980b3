use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

use crate::models::{
    ApiResponse, Caller, CreateUserForm, ErrorResponse, ServiceError, UpdateUserForm,
    UserCreatedResponse, UserListResponse,
};
use crate::services::AccountService;

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserForm,
    responses(
        (status = 201, description = "User created", body = UserCreatedResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn create_user_api(
    caller: Caller,
    account_service: web::Data<AccountService>,
    form: web::Json<CreateUserForm>,
) -> Result<HttpResponse, ServiceError> {
    let id = account_service
        .create_user(&caller, &form.email, &form.password, &form.full_name, form.role)
        .await?;

    Ok(HttpResponse::Created().json(UserCreatedResponse {
        success: true,
        message: "User created successfully".to_string(),
        id,
    }))
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Profiles with their role, ordered by name", body = UserListResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse)
    )
)]
pub async fn list_users(
    caller: Caller,
    account_service: web::Data<AccountService>,
) -> Result<HttpResponse, ServiceError> {
    let users = account_service.list_users(&caller).await?;

    Ok(HttpResponse::Ok().json(UserListResponse {
        success: true,
        users,
    }))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserForm,
    responses(
        (status = 200, description = "User updated", body = ApiResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn update_user(
    caller: Caller,
    account_service: web::Data<AccountService>,
    path: web::Path<Uuid>,
    form: web::Json<UpdateUserForm>,
) -> Result<HttpResponse, ServiceError> {
    account_service
        .update_user(&caller, path.into_inner(), &form.full_name, form.role)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse {
        success: true,
        message: "User updated successfully".to_string(),
    }))
}
