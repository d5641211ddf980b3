use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ServiceError;

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Login material for an account
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credentials {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// Profile joined with its (optional) role
#[derive(Debug, Clone, sqlx::FromRow, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Option<Role>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn first_name(&self) -> &str {
        self.full_name.split_whitespace().next().unwrap_or("")
    }
}

/// Validated input for creating an account, its profile and its role.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
}

impl NewAccount {
    /// Checks the raw fields and hashes the password.
    pub fn new(email: &str, password: &str, full_name: &str, role: Role) -> Result<Self, ServiceError> {
        let email = email.trim();
        let full_name = full_name.trim();

        if email.is_empty() || full_name.is_empty() || password.is_empty() {
            return Err(ServiceError::ValidationFailed(
                "Full name, email and password are required".to_string(),
            ));
        }

        if !email.contains('@') {
            return Err(ServiceError::ValidationFailed(format!("'{}' is not a valid email", email)));
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ServiceError::ValidationFailed(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            email: email.to_lowercase(),
            password_hash: crate::auth::hash_password(password)?,
            full_name: full_name.to_string(),
            role,
        })
    }
}

/// The authenticated actor of a request.
#[derive(Debug, Clone)]
pub struct Caller {
    pub id: Uuid,
    pub email: String,
    pub role: Option<Role>,
}

impl Caller {
    /// A caller without a role row is treated as unprivileged.
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    pub fn require_admin(&self) -> Result<(), ServiceError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ServiceError::Forbidden("Administrator role required".to_string()))
        }
    }

    /// Admins may act on anyone, users only on themselves.
    pub fn require_self_or_admin(&self, user_id: Uuid) -> Result<(), ServiceError> {
        if self.is_admin() || self.id == user_id {
            Ok(())
        } else {
            Err(ServiceError::Forbidden("Not allowed to view another user's records".to_string()))
        }
    }
}
