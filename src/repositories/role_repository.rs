use crate::models::{is_foreign_key_violation, Role, ServiceError};
use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Sets the user's single role in one statement; there is never a moment with no role row.
    async fn replace_role(&self, user_id: Uuid, role: Role) -> Result<(), ServiceError>;
}

pub struct SqliteRoleRepository {
    pool: SqlitePool,
}

impl SqliteRoleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Inserts the role row or rewrites it in place. The row keeps its id on conflict.
pub(crate) async fn upsert_role(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    role: Role,
) -> Result<(), ServiceError> {
    sqlx::query(
        "INSERT INTO user_roles (id, user_id, role) VALUES (?, ?, ?)
         ON CONFLICT(user_id) DO UPDATE SET role = excluded.role",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(role)
    .execute(&mut *conn)
    .await
    .map_err(|e| {
        if is_foreign_key_violation(&e) {
            ServiceError::NotFound("User not found".to_string())
        } else {
            e.into()
        }
    })?;

    Ok(())
}

#[async_trait]
impl RoleRepository for SqliteRoleRepository {
    async fn replace_role(&self, user_id: Uuid, role: Role) -> Result<(), ServiceError> {
        let mut conn = self.pool.acquire().await?;
        upsert_role(&mut *conn, user_id, role).await
    }
}
