use crate::api::AppState;
use crate::api::extract::LenientJson;
use crate::api::schemas::shifts::{CompleteEntryRequest, CreateEntryRequest, ListEntriesQuery, ShiftResponse};
use crate::error::{AppError, Result};
use crate::services::shift_service::{CompleteEntry, CreateEntry};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

/// Opens a shift.
///
/// # Errors
/// Returns `EMPLOYEE_REQUIRED` / `INVALID_START` for bad input and
/// `SHIFT_ALREADY_OPEN` when the employee is already clocked in.
pub async fn create_entry(
    State(state): State<AppState>,
    LenientJson(payload): LenientJson<CreateEntryRequest>,
) -> Result<impl IntoResponse> {
    let started_at = parse_timestamp(payload.started_at.as_deref(), "INVALID_START")?;

    let shift = state
        .shift_service
        .create_entry(CreateEntry {
            employee_id: payload.employee_id.unwrap_or_default(),
            note: payload.note.unwrap_or_default(),
            started_at,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ShiftResponse::from(shift))))
}

/// Completes a shift, by entry id or by employee id.
///
/// # Errors
/// Returns `ENTRY_NOT_FOUND` if no matching open shift exists.
pub async fn complete_entry(
    State(state): State<AppState>,
    LenientJson(payload): LenientJson<CompleteEntryRequest>,
) -> Result<impl IntoResponse> {
    let entry_id = payload
        .entry_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Uuid::parse_str(s).map_err(|_| AppError::validation("INVALID_ENTRY_ID", format!("not a valid entry id: {s}")))
        })
        .transpose()?;
    let ended_at = parse_timestamp(payload.ended_at.as_deref(), "INVALID_END")?;

    let shift = state
        .shift_service
        .complete_entry(CompleteEntry { entry_id, employee_id: payload.employee_id, ended_at })
        .await?;

    Ok(Json(ShiftResponse::from(shift)))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ListEntriesQuery>,
) -> Result<impl IntoResponse> {
    let shifts = state.shift_service.list_entries(query.employee_id.as_deref(), query.limit.as_deref()).await?;

    Ok(Json(shifts.into_iter().map(ShiftResponse::from).collect::<Vec<_>>()))
}

fn parse_timestamp(raw: Option<&str>, code: &'static str) -> Result<Option<OffsetDateTime>> {
    raw.map(|s| {
        OffsetDateTime::parse(s, &Rfc3339)
            .map_err(|_| AppError::validation(code, format!("not a valid RFC 3339 timestamp: {s}")))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_parsing_accepts_rfc3339_and_rejects_junk() {
        assert!(matches!(parse_timestamp(None, "INVALID_START"), Ok(None)));
        assert!(matches!(parse_timestamp(Some("2026-08-30T08:00:00Z"), "INVALID_START"), Ok(Some(_))));
        let err = parse_timestamp(Some("yesterday"), "INVALID_START").expect_err("junk must not parse");
        assert_eq!(err.code(), "INVALID_START");
    }
}
