use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Serialize, Serializer};
use utoipa::ToSchema;
use uuid::Uuid;

use super::ServiceError;

/// Fixed hourly rate applied to every overtime hour.
pub const HOURLY_RATE: f64 = 15.57;

/// Minutes deducted from an entry when a lunch break was taken.
pub const LUNCH_DEDUCTION_MINUTES: i64 = 60;

const TIME_FORMAT: &str = "%H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Hours and value derived from a start/end pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct OvertimeAmount {
    pub total_hours: f64,
    pub total_value: f64,
}

impl OvertimeAmount {
    /// Elapsed time between `start` and `end`, minus the lunch deduction,
    /// valued at [`HOURLY_RATE`]. Both figures are clamped at zero.
    ///
    /// `end` before `start` is not read as crossing midnight: a 22:00 to
    /// 02:00 entry is worth nothing.
    pub fn compute(start: NaiveTime, end: NaiveTime, had_lunch: bool) -> Self {
        let mut minutes = minutes_since_midnight(end) - minutes_since_midnight(start);
        if had_lunch {
            minutes -= LUNCH_DEDUCTION_MINUTES;
        }

        let total_hours = minutes as f64 / 60.0;
        let total_value = total_hours * HOURLY_RATE;

        Self {
            total_hours: total_hours.max(0.0),
            total_value: total_value.max(0.0),
        }
    }
}

fn minutes_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

pub fn parse_time(field: &str, value: &str) -> Result<NaiveTime, ServiceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServiceError::ValidationFailed(format!("{} is required", field)));
    }

    // Browsers may send seconds along with the time-of-day
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map(|t| t.with_second(0).unwrap_or(t))
        .map_err(|_| {
            ServiceError::ValidationFailed(format!("{} must be formatted as HH:MM, got '{}'", field, value))
        })
}

pub fn parse_date(value: &str) -> Result<NaiveDate, ServiceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServiceError::ValidationFailed("Date is required".to_string()));
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        ServiceError::ValidationFailed(format!("Date must be formatted as YYYY-MM-DD, got '{}'", value))
    })
}

/// A candidate overtime entry that passed field validation.
#[derive(Debug, Clone)]
pub struct OvertimeEntry {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub had_lunch: bool,
}

impl OvertimeEntry {
    pub fn new(
        user_id: &str,
        date: &str,
        start_time: &str,
        end_time: &str,
        had_lunch: bool,
    ) -> Result<Self, ServiceError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(ServiceError::ValidationFailed("Select a user".to_string()));
        }
        let user_id = Uuid::parse_str(user_id)
            .map_err(|_| ServiceError::ValidationFailed(format!("Invalid user id '{}'", user_id)))?;

        Ok(Self {
            user_id,
            date: parse_date(date)?,
            start_time: parse_time("Start time", start_time)?,
            end_time: parse_time("End time", end_time)?,
            had_lunch,
        })
    }

    pub fn amount(&self) -> OvertimeAmount {
        OvertimeAmount::compute(self.start_time, self.end_time, self.had_lunch)
    }

    /// Build the record to persist. Totals always come from [`OvertimeAmount::compute`].
    pub fn into_record(self, created_by: Uuid) -> OvertimeRecord {
        let amount = self.amount();
        OvertimeRecord {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            owner_name: None,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            had_lunch: self.had_lunch,
            total_hours: amount.total_hours,
            total_value: amount.total_value,
            created_by,
            created_at: Utc::now(),
        }
    }
}

/// Persisted overtime entry. Never updated in place.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, ToSchema)]
pub struct OvertimeRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Display name of the owner, joined from profiles on reads
    pub owner_name: Option<String>,
    #[schema(value_type = String, example = "2025-03-14")]
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_time")]
    #[schema(value_type = String, example = "08:00")]
    pub start_time: NaiveTime,
    #[serde(serialize_with = "serialize_time")]
    #[schema(value_type = String, example = "17:30")]
    pub end_time: NaiveTime,
    pub had_lunch: bool,
    pub total_hours: f64,
    pub total_value: f64,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

fn serialize_time<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&time.format(TIME_FORMAT).to_string())
}

/// Read-side sums over whatever records are currently loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct OvertimeTotals {
    pub record_count: usize,
    pub total_hours: f64,
    pub total_value: f64,
}

impl OvertimeTotals {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a OvertimeRecord>,
    {
        records
            .into_iter()
            .fold(Self::default(), |acc, record| Self {
                record_count: acc.record_count + 1,
                total_hours: acc.total_hours + record.total_hours,
                total_value: acc.total_value + record.total_value,
            })
    }

    pub fn formatted_hours(&self) -> String {
        format!("{:.2}h", self.total_hours)
    }

    pub fn formatted_value(&self) -> String {
        format!("{:.2}", self.total_value)
    }
}

/// Records ordered by date descending, with their totals.
#[derive(Debug, Clone)]
pub struct OvertimeLedger {
    pub records: Vec<OvertimeRecord>,
    pub totals: OvertimeTotals,
}

impl OvertimeLedger {
    pub fn new(records: Vec<OvertimeRecord>) -> Self {
        let totals = OvertimeTotals::from_records(&records);
        Self { records, totals }
    }
}
