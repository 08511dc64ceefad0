use crate::domain::shift::{ShiftRecord, ShiftStatus};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub(crate) struct Shift {
    pub id: Uuid,
    pub employee_id: String,
    pub shift_date: Date,
    pub check_in: OffsetDateTime,
    pub check_out: Option<OffsetDateTime>,
    pub worked_minutes: Option<i32>,
    pub status: String,
    pub note: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<Shift> for ShiftRecord {
    fn from(record: Shift) -> Self {
        Self {
            id: record.id,
            employee_id: record.employee_id,
            shift_date: record.shift_date,
            check_in: record.check_in,
            check_out: record.check_out,
            worked_minutes: record.worked_minutes,
            status: ShiftStatus::from_db(&record.status),
            note: record.note,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
