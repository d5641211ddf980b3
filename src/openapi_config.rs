use std::collections::BTreeMap;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityRequirement, SecurityScheme};
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "Overtime Ledger API", description = "Overtime entries, totals and user administration"),
    paths(
        handlers::auth::login_api,
        handlers::auth::logout_api,
        handlers::auth::me_api,
        handlers::overtime::create_overtime,
        handlers::overtime::calculate_overtime,
        handlers::overtime::list_overtime,
        handlers::overtime::list_user_overtime,
        handlers::overtime::delete_overtime,
        handlers::users::create_user_api,
        handlers::users::list_users,
        handlers::users::update_user,
        handlers::setup::setup_status,
        handlers::setup::create_first_admin,
    ),
    components(schemas(
        models::LoginForm,
        models::OvertimeForm,
        models::CalculateForm,
        models::CreateUserForm,
        models::UpdateUserForm,
        models::ApiResponse,
        models::ErrorResponse,
        models::LoginResponse,
        models::MeResponse,
        models::OvertimeRecord,
        models::OvertimeAmount,
        models::OvertimeSummary,
        models::OvertimeLedgerResponse,
        models::OvertimeCreatedResponse,
        models::CalculateResponse,
        models::UserProfile,
        models::Role,
        models::UserListResponse,
        models::UserCreatedResponse,
        models::SetupStatusResponse,
        models::FirstAdminResponse,
    ))
)]
pub struct ApiDoc;

pub fn configure_openapi(mut openapi: OpenApiSpec) -> OpenApiSpec {
    // Bearer token security scheme (HTTP Bearer type, not ApiKey)
    let mut security_schemes = BTreeMap::new();
    security_schemes.insert(
        "bearer_auth".to_string(),
        SecurityScheme::Http(
            HttpBuilder::new()
                .scheme(HttpAuthScheme::Bearer)
                .bearer_format("JWT")
                .description(Some("JWT token authorization"))
                .build(),
        ),
    );

    if let Some(components) = openapi.components.as_mut() {
        components.security_schemes = security_schemes;
    }

    // Applies to every endpoint without a security() override
    openapi.security = Some(vec![SecurityRequirement::new(
        "bearer_auth",
        Vec::<String>::new(),
    )]);

    openapi
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_lists_routes_and_bearer_scheme() {
        let spec = configure_openapi(ApiDoc::openapi());

        assert!(spec.paths.paths.contains_key("/api/overtime"));
        assert!(spec.paths.paths.contains_key("/api/setup/first-admin"));
        let components = spec.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
