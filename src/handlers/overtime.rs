use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

use crate::models::{
    ApiResponse, CalculateForm, CalculateResponse, Caller, ErrorResponse, OvertimeCreatedResponse,
    OvertimeForm, OvertimeLedgerResponse, ServiceError,
};
use crate::services::OvertimeService;

#[utoipa::path(
    post,
    path = "/api/overtime",
    request_body = OvertimeForm,
    responses(
        (status = 201, description = "Overtime record created", body = OvertimeCreatedResponse),
        (status = 400, description = "Missing or malformed field", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse)
    )
)]
pub async fn create_overtime(
    caller: Caller,
    overtime_service: web::Data<OvertimeService>,
    form: web::Json<OvertimeForm>,
) -> Result<HttpResponse, ServiceError> {
    let record = overtime_service.create_record(&caller, &form).await?;

    Ok(HttpResponse::Created().json(OvertimeCreatedResponse {
        success: true,
        message: "Overtime recorded successfully".to_string(),
        record,
    }))
}

#[utoipa::path(
    post,
    path = "/api/overtime/calculate",
    request_body = CalculateForm,
    responses(
        (status = 200, description = "Hours and value for the given times", body = CalculateResponse),
        (status = 400, description = "Missing or malformed time", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn calculate_overtime(
    _caller: Caller,
    overtime_service: web::Data<OvertimeService>,
    form: web::Json<CalculateForm>,
) -> Result<HttpResponse, ServiceError> {
    let amount = overtime_service.calculate(&form)?;

    Ok(HttpResponse::Ok().json(CalculateResponse {
        success: true,
        amount,
    }))
}

#[utoipa::path(
    get,
    path = "/api/overtime",
    responses(
        (status = 200, description = "All records for admins, own records for users, newest first", body = OvertimeLedgerResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn list_overtime(
    caller: Caller,
    overtime_service: web::Data<OvertimeService>,
) -> Result<HttpResponse, ServiceError> {
    let ledger = overtime_service.ledger_for(&caller).await?;

    Ok(HttpResponse::Ok().json(OvertimeLedgerResponse::from(ledger)))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/overtime",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Records of one user, newest first", body = OvertimeLedgerResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not allowed to view this user", body = ErrorResponse)
    )
)]
pub async fn list_user_overtime(
    caller: Caller,
    overtime_service: web::Data<OvertimeService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let ledger = overtime_service
        .ledger_for_user(&caller, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(OvertimeLedgerResponse::from(ledger)))
}

#[utoipa::path(
    delete,
    path = "/api/overtime/{id}",
    params(
        ("id" = Uuid, Path, description = "Overtime record ID")
    ),
    responses(
        (status = 200, description = "Record deleted", body = ApiResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse),
        (status = 404, description = "Record not found", body = ErrorResponse)
    )
)]
pub async fn delete_overtime(
    caller: Caller,
    overtime_service: web::Data<OvertimeService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    overtime_service
        .delete_record(&caller, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse {
        success: true,
        message: "Overtime record deleted".to_string(),
    }))
}
