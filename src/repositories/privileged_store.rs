use crate::models::{NewAccount, ServiceError};
use crate::repositories::account_repository::insert_account;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Elevated write access used only by the first-administrator bootstrap.
///
/// Ordinary services are never handed this capability; they go through
/// [`AccountRepository`](super::AccountRepository) and
/// [`RoleRepository`](super::RoleRepository), whose writes are gated by the
/// caller's role.
#[async_trait]
pub trait PrivilegedStore: Send + Sync {
    async fn admin_exists(&self) -> Result<bool, ServiceError>;
    /// Creates `account` as administrator unless an administrator already exists.
    async fn create_first_admin(&self, account: &NewAccount) -> Result<(), ServiceError>;
}

pub struct SqlitePrivilegedStore {
    pool: SqlitePool,
}

impl SqlitePrivilegedStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const ADMIN_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM user_roles WHERE role = 'admin')";

#[async_trait]
impl PrivilegedStore for SqlitePrivilegedStore {
    async fn admin_exists(&self) -> Result<bool, ServiceError> {
        let exists = sqlx::query_scalar::<_, bool>(ADMIN_EXISTS)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn create_first_admin(&self, account: &NewAccount) -> Result<(), ServiceError> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, bool>(ADMIN_EXISTS)
            .fetch_one(&mut *tx)
            .await?;
        if exists {
            return Err(ServiceError::AlreadyExists("Admin user already exists".to_string()));
        }

        insert_account(&mut *tx, account).await?;
        tx.commit().await?;

        Ok(())
    }
}
