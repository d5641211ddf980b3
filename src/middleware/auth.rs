use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use std::future::Future;
use std::pin::Pin;

use crate::auth::{verify_jwt, JwtManager};
use crate::models::{Caller, ServiceError};
use crate::services::AccountService;

/// Verifies the bearer token and loads the caller's current role.
pub async fn authenticate_caller(
    req: &HttpRequest,
    jwt_manager: &JwtManager,
    accounts: &AccountService,
) -> Result<Caller, ServiceError> {
    let claims = verify_jwt(req, jwt_manager)?;
    accounts.resolve_caller(&claims).await
}

/// Handlers list `Caller` ahead of their body so a missing or bad token
/// is reported before the payload is looked at.
impl FromRequest for Caller {
    type Error = ServiceError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let jwt_manager = req.app_data::<web::Data<JwtManager>>().ok_or_else(|| {
                ServiceError::BackendFailure("JWT manager is not registered".to_string())
            })?;
            let accounts = req.app_data::<web::Data<AccountService>>().ok_or_else(|| {
                ServiceError::BackendFailure("Account service is not registered".to_string())
            })?;

            authenticate_caller(&req, jwt_manager, accounts).await
        })
    }
}
