use actix_web::{web, HttpResponse, Result};

use crate::auth::{JwtManager, TOKEN_TTL_HOURS};
use crate::models::{
    ApiResponse, Caller, ErrorResponse, LoginForm, LoginResponse, MeResponse, ServiceError,
};
use crate::services::AccountService;

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginForm,
    responses(
        (status = 200, description = "Login successful - JWT token returned in response body", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    security()
)]
pub async fn login_api(
    account_service: web::Data<AccountService>,
    form: web::Json<LoginForm>,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    let credentials = account_service
        .authenticate(&form.email, &form.password)
        .await?;

    let token = jwt_manager.generate_token(credentials.id, &credentials.email)?;

    tracing::info!(user_id = %credentials.id, "Login successful");
    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
        expires_in: (TOKEN_TTL_HOURS * 3600) as u64,
    }))
}

#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logout successful", body = ApiResponse)
    ),
    security()
)]
pub async fn logout_api() -> Result<HttpResponse, ServiceError> {
    // Tokens are stateless; the client discards its copy
    Ok(HttpResponse::Ok().json(ApiResponse {
        success: true,
        message: "Logout successful - discard your token".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Profile of the authenticated caller", body = MeResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn me_api(
    caller: Caller,
    account_service: web::Data<AccountService>,
) -> Result<HttpResponse, ServiceError> {
    let profile = account_service.current_profile(&caller).await?;

    Ok(HttpResponse::Ok().json(MeResponse {
        success: true,
        first_name: profile.first_name().to_string(),
        profile,
    }))
}
