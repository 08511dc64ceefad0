use crate::domain::shift::ShiftRecord;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    #[serde(default, alias = "employee_id")]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    /// RFC 3339; absent means "now".
    #[serde(default, alias = "started_at")]
    pub started_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteEntryRequest {
    #[serde(default, alias = "entry_id")]
    pub entry_id: Option<String>,
    #[serde(default, alias = "employee_id")]
    pub employee_id: Option<String>,
    #[serde(default, alias = "ended_at")]
    pub ended_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntriesQuery {
    #[serde(default, alias = "employee_id")]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftResponse {
    pub id: Uuid,
    pub employee_id: String,
    /// ISO calendar date the shift began (`YYYY-MM-DD`).
    pub date: String,
    #[serde(with = "time::serde::rfc3339")]
    pub check_in: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub check_out: Option<OffsetDateTime>,
    pub worked_minutes: Option<i32>,
    /// Derived presentation field; minutes is the stored unit.
    pub worked_hours: Option<f64>,
    pub status: &'static str,
    pub note: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<ShiftRecord> for ShiftResponse {
    fn from(record: ShiftRecord) -> Self {
        let worked_hours = record.worked_hours();
        Self {
            id: record.id,
            employee_id: record.employee_id,
            date: record.shift_date.to_string(),
            check_in: record.check_in,
            check_out: record.check_out,
            worked_minutes: record.worked_minutes,
            worked_hours,
            status: record.status.as_str(),
            note: record.note,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
