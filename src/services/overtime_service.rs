use crate::models::{
    parse_time, CalculateForm, Caller, OvertimeAmount, OvertimeEntry, OvertimeForm, OvertimeLedger,
    OvertimeRecord, ServiceError,
};
use crate::repositories::OvertimeRepository;
use std::sync::Arc;
use uuid::Uuid;

pub struct OvertimeService {
    repository: Arc<dyn OvertimeRepository>,
}

impl OvertimeService {
    pub fn new(repository: Arc<dyn OvertimeRepository>) -> Self {
        Self { repository }
    }

    /// Records an entry on behalf of `form.user_id`. Admin only.
    pub async fn create_record(
        &self,
        caller: &Caller,
        form: &OvertimeForm,
    ) -> Result<OvertimeRecord, ServiceError> {
        caller.require_admin()?;

        let entry = OvertimeEntry::new(
            &form.user_id,
            &form.date,
            &form.start_time,
            &form.end_time,
            form.had_lunch,
        )?;
        let record = entry.into_record(caller.id);

        self.repository.insert(&record).await?;

        tracing::info!(
            record_id = %record.id,
            user_id = %record.user_id,
            created_by = %caller.id,
            total_hours = record.total_hours,
            "Overtime record created"
        );

        // Re-read to pick up the owner's display name
        Ok(self.repository.find_by_id(record.id).await?.unwrap_or(record))
    }

    /// Computes hours and value without persisting anything.
    pub fn calculate(&self, form: &CalculateForm) -> Result<OvertimeAmount, ServiceError> {
        let start = parse_time("Start time", &form.start_time)?;
        let end = parse_time("End time", &form.end_time)?;

        Ok(OvertimeAmount::compute(start, end, form.had_lunch))
    }

    /// Everything for admins, only their own records for users.
    pub async fn ledger_for(&self, caller: &Caller) -> Result<OvertimeLedger, ServiceError> {
        let records = if caller.is_admin() {
            self.repository.find_all().await?
        } else {
            self.repository.find_by_user(caller.id).await?
        };

        Ok(OvertimeLedger::new(records))
    }

    pub async fn ledger_for_user(
        &self,
        caller: &Caller,
        user_id: Uuid,
    ) -> Result<OvertimeLedger, ServiceError> {
        caller.require_self_or_admin(user_id)?;

        let records = self.repository.find_by_user(user_id).await?;
        Ok(OvertimeLedger::new(records))
    }

    /// Hard delete. Admin only.
    pub async fn delete_record(&self, caller: &Caller, id: Uuid) -> Result<(), ServiceError> {
        caller.require_admin()?;

        if !self.repository.delete(id).await? {
            return Err(ServiceError::NotFound("Overtime record not found".to_string()));
        }

        tracing::info!(record_id = %id, deleted_by = %caller.id, "Overtime record deleted");
        Ok(())
    }
}
