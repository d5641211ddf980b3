use crate::models::{is_unique_violation, Credentials, NewAccount, Role, ServiceError, UserProfile};
use crate::repositories::role_repository::upsert_role;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

const PROFILE_SELECT: &str = "SELECT u.id, u.email, p.full_name, r.role, u.created_at
     FROM users u
     JOIN profiles p ON p.id = u.id
     LEFT JOIN user_roles r ON r.user_id = u.id";

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_credentials_by_email(&self, email: &str) -> Result<Option<Credentials>, ServiceError>;
    async fn find_profile(&self, id: Uuid) -> Result<Option<UserProfile>, ServiceError>;
    async fn list_profiles(&self) -> Result<Vec<UserProfile>, ServiceError>;
    /// Inserts the account, its profile and its role in one transaction.
    async fn create_account(&self, account: &NewAccount) -> Result<(), ServiceError>;
    /// Applies a display-name change and a role change together, or neither.
    async fn update_profile(
        &self,
        id: Uuid,
        full_name: Option<&str>,
        role: Option<Role>,
    ) -> Result<(), ServiceError>;
}

pub struct SqliteAccountRepository {
    pool: SqlitePool,
}

impl SqliteAccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Writes the three rows that make up an account. Callers own the transaction.
pub(crate) async fn insert_account(
    conn: &mut SqliteConnection,
    account: &NewAccount,
) -> Result<(), ServiceError> {
    sqlx::query("INSERT INTO users (id, email, password_hash, created_at) VALUES (?, ?, ?, ?)")
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ServiceError::AlreadyExists("Email already registered".to_string())
            } else {
                e.into()
            }
        })?;

    sqlx::query("INSERT INTO profiles (id, full_name) VALUES (?, ?)")
        .bind(account.id)
        .bind(&account.full_name)
        .execute(&mut *conn)
        .await?;

    sqlx::query("INSERT INTO user_roles (id, user_id, role) VALUES (?, ?, ?)")
        .bind(Uuid::new_v4())
        .bind(account.id)
        .bind(account.role)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

#[async_trait]
impl AccountRepository for SqliteAccountRepository {
    async fn find_credentials_by_email(&self, email: &str) -> Result<Option<Credentials>, ServiceError> {
        let credentials = sqlx::query_as::<_, Credentials>(
            "SELECT id, email, password_hash FROM users WHERE email = ?",
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(credentials)
    }

    async fn find_profile(&self, id: Uuid) -> Result<Option<UserProfile>, ServiceError> {
        let sql = format!("{} WHERE u.id = ?", PROFILE_SELECT);
        let profile = sqlx::query_as::<_, UserProfile>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, ServiceError> {
        let sql = format!("{} ORDER BY p.full_name COLLATE NOCASE, u.email", PROFILE_SELECT);
        let profiles = sqlx::query_as::<_, UserProfile>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(profiles)
    }

    async fn create_account(&self, account: &NewAccount) -> Result<(), ServiceError> {
        let mut tx = self.pool.begin().await?;
        insert_account(&mut *tx, account).await?;
        tx.commit().await?;

        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        full_name: Option<&str>,
        role: Option<Role>,
    ) -> Result<(), ServiceError> {
        let mut tx = self.pool.begin().await?;

        if let Some(full_name) = full_name {
            let result = sqlx::query("UPDATE profiles SET full_name = ? WHERE id = ?")
                .bind(full_name)
                .bind(id)
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() == 0 {
                return Err(ServiceError::NotFound("User not found".to_string()));
            }
        }

        if let Some(role) = role {
            upsert_role(&mut *tx, id, role).await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
