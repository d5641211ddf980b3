use crate::models::overtime::{OvertimeAmount, OvertimeLedger, OvertimeRecord, OvertimeTotals};
use crate::models::user::{Role, UserProfile};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// =============================================================================
// REQUEST TYPES
// =============================================================================

#[derive(Deserialize, ToSchema)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Missing fields deserialize as empty so the service reports which one is absent.
#[derive(Deserialize, ToSchema)]
pub struct OvertimeForm {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    #[schema(example = "2025-03-14")]
    pub date: String,
    #[serde(default)]
    #[schema(example = "08:00")]
    pub start_time: String,
    #[serde(default)]
    #[schema(example = "17:30")]
    pub end_time: String,
    #[serde(default)]
    pub had_lunch: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct CalculateForm {
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub had_lunch: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateUserForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::User
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateUserForm {
    #[serde(default)]
    pub full_name: String,
    /// Left unchanged when omitted.
    #[serde(default)]
    pub role: Option<Role>,
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

// Common response types
#[derive(Serialize, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

// Authentication responses
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub expires_in: u64, // seconds
}

#[derive(Serialize, ToSchema)]
pub struct MeResponse {
    pub success: bool,
    pub first_name: String,
    pub profile: UserProfile,
}

// Overtime responses
#[derive(Serialize, ToSchema)]
pub struct OvertimeSummary {
    pub record_count: usize,
    pub total_hours: f64,
    pub total_value: f64,
    pub formatted_hours: String,
    pub formatted_value: String,
}

impl From<OvertimeTotals> for OvertimeSummary {
    fn from(totals: OvertimeTotals) -> Self {
        Self {
            formatted_hours: totals.formatted_hours(),
            formatted_value: totals.formatted_value(),
            record_count: totals.record_count,
            total_hours: totals.total_hours,
            total_value: totals.total_value,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct OvertimeLedgerResponse {
    pub success: bool,
    pub records: Vec<OvertimeRecord>,
    pub summary: OvertimeSummary,
}

impl From<OvertimeLedger> for OvertimeLedgerResponse {
    fn from(ledger: OvertimeLedger) -> Self {
        Self {
            success: true,
            summary: ledger.totals.into(),
            records: ledger.records,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct OvertimeCreatedResponse {
    pub success: bool,
    pub message: String,
    pub record: OvertimeRecord,
}

#[derive(Serialize, ToSchema)]
pub struct CalculateResponse {
    pub success: bool,
    pub amount: OvertimeAmount,
}

// User management responses
#[derive(Serialize, ToSchema)]
pub struct UserListResponse {
    pub success: bool,
    pub users: Vec<UserProfile>,
}

#[derive(Serialize, ToSchema)]
pub struct UserCreatedResponse {
    pub success: bool,
    pub message: String,
    pub id: Uuid,
}

// Setup responses
#[derive(Serialize, ToSchema)]
pub struct SetupStatusResponse {
    pub success: bool,
    pub admin_exists: bool,
}

#[derive(Serialize, ToSchema)]
pub struct FirstAdminResponse {
    pub success: bool,
    pub message: String,
    pub email: String,
}
