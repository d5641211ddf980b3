use crate::models::{is_foreign_key_violation, OvertimeRecord, ServiceError};
use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

const RECORD_SELECT: &str = "SELECT o.id, o.user_id, p.full_name AS owner_name, o.date, o.start_time,
            o.end_time, o.had_lunch, o.total_hours, o.total_value, o.created_by, o.created_at
     FROM overtime_records o
     LEFT JOIN profiles p ON p.id = o.user_id";

const NEWEST_FIRST: &str = "ORDER BY o.date DESC, o.start_time DESC, o.created_at DESC";

#[async_trait]
pub trait OvertimeRepository: Send + Sync {
    async fn insert(&self, record: &OvertimeRecord) -> Result<(), ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<OvertimeRecord>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<OvertimeRecord>, ServiceError>;
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<OvertimeRecord>, ServiceError>;
    /// Returns false when no record had this id.
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

pub struct SqliteOvertimeRepository {
    pool: SqlitePool,
}

impl SqliteOvertimeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OvertimeRepository for SqliteOvertimeRepository {
    async fn insert(&self, record: &OvertimeRecord) -> Result<(), ServiceError> {
        sqlx::query(
            "INSERT INTO overtime_records
                (id, user_id, date, start_time, end_time, had_lunch, total_hours, total_value, created_by, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(record.date)
        .bind(record.start_time)
        .bind(record.end_time)
        .bind(record.had_lunch)
        .bind(record.total_hours)
        .bind(record.total_value)
        .bind(record.created_by)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                ServiceError::ValidationFailed("Selected user does not exist".to_string())
            } else {
                e.into()
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<OvertimeRecord>, ServiceError> {
        let sql = format!("{} WHERE o.id = ?", RECORD_SELECT);
        let record = sqlx::query_as::<_, OvertimeRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<OvertimeRecord>, ServiceError> {
        let sql = format!("{} {}", RECORD_SELECT, NEWEST_FIRST);
        let records = sqlx::query_as::<_, OvertimeRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<OvertimeRecord>, ServiceError> {
        let sql = format!("{} WHERE o.user_id = ? {}", RECORD_SELECT, NEWEST_FIRST);
        let records = sqlx::query_as::<_, OvertimeRecord>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let result = sqlx::query("DELETE FROM overtime_records WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
