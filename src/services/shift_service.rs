use crate::domain::shift::{ShiftRecord, ShiftStatus, local_date, worked_minutes};
use crate::error::{AppError, Result};
use crate::storage::is_unique_violation;
use crate::storage::shift_repo::ShiftRepository;
use time::OffsetDateTime;
use uuid::Uuid;

const DEFAULT_LIST_LIMIT: i64 = 20;
const MAX_LIST_LIMIT: i64 = 100;

#[derive(Debug)]
pub struct CreateEntry {
    pub employee_id: String,
    pub note: String,
    pub started_at: Option<OffsetDateTime>,
}

#[derive(Debug)]
pub struct CompleteEntry {
    pub entry_id: Option<Uuid>,
    pub employee_id: Option<String>,
    pub ended_at: Option<OffsetDateTime>,
}

/// Orchestrates the shift lifecycle on top of the ledger: opening entries,
/// completing them with the duration policy, and the single-open-shift
/// invariant.
#[derive(Clone, Debug)]
pub struct ShiftService {
    repo: ShiftRepository,
}

impl ShiftService {
    #[must_use]
    pub const fn new(repo: ShiftRepository) -> Self {
        Self { repo }
    }

    /// Opens a new shift for an employee.
    ///
    /// # Errors
    /// Returns `EMPLOYEE_REQUIRED` when the employee id is blank and
    /// `SHIFT_ALREADY_OPEN` when the employee already has an open shift.
    #[tracing::instrument(skip(self, params), fields(employee_id = tracing::field::Empty), err(level = "warn"))]
    pub async fn create_entry(&self, params: CreateEntry) -> Result<ShiftRecord> {
        let employee_id = params.employee_id.trim();
        if employee_id.is_empty() {
            return Err(AppError::validation("EMPLOYEE_REQUIRED", "employeeId is required"));
        }
        tracing::Span::current().record("employee_id", employee_id);

        if self.repo.has_open_shift(employee_id).await? {
            return Err(AppError::conflict("SHIFT_ALREADY_OPEN", "employee already has an open shift"));
        }

        let check_in = params.started_at.unwrap_or_else(OffsetDateTime::now_utc);
        let shift_date = local_date(check_in);

        // The precheck above races with concurrent creates; the partial
        // unique index is the authoritative guard.
        let shift = match self.repo.create(employee_id, params.note.trim(), check_in, shift_date).await {
            Err(AppError::Database(e)) if is_unique_violation(&e) => {
                return Err(AppError::conflict("SHIFT_ALREADY_OPEN", "employee already has an open shift"));
            }
            other => other?,
        };

        tracing::info!(entry_id = %shift.id, "Shift opened");
        Ok(shift)
    }

    /// Completes an open shift, addressed by entry id or by employee id
    /// (entry id wins when both are given).
    ///
    /// # Errors
    /// Returns `ENTRY_NOT_FOUND` when no matching open shift exists and
    /// `UPDATE_FAILED` when the conditional update matches nothing and the
    /// re-read does not show a completed record.
    #[tracing::instrument(skip(self, params), fields(entry_id = tracing::field::Empty), err(level = "warn"))]
    pub async fn complete_entry(&self, params: CompleteEntry) -> Result<ShiftRecord> {
        let open_shift = self.resolve_open_shift(&params).await?;
        tracing::Span::current().record("entry_id", tracing::field::display(open_shift.id));

        let check_out = params.ended_at.unwrap_or_else(OffsetDateTime::now_utc);
        let minutes = worked_minutes(open_shift.check_in, check_out);

        match self.repo.complete(open_shift.id, check_out, minutes).await? {
            Some(shift) => {
                tracing::info!(worked_minutes = minutes, "Shift completed");
                Ok(shift)
            }
            // Lost a race with a concurrent completion: the status guard no
            // longer matched. Re-read and surface whatever won.
            None => match self.repo.find_by_id(open_shift.id).await? {
                Some(shift) if shift.status == ShiftStatus::Completed => {
                    tracing::debug!("Completion race lost, returning winner's record");
                    Ok(shift)
                }
                _ => Err(AppError::UpdateFailed),
            },
        }
    }

    async fn resolve_open_shift(&self, params: &CompleteEntry) -> Result<ShiftRecord> {
        if let Some(entry_id) = params.entry_id {
            return match self.repo.find_by_id(entry_id).await? {
                Some(shift) if shift.status == ShiftStatus::Open => Ok(shift),
                _ => Err(AppError::NotFound { code: "ENTRY_NOT_FOUND" }),
            };
        }

        let employee_id = params.employee_id.as_deref().map(str::trim).unwrap_or_default();
        if employee_id.is_empty() {
            return Err(AppError::validation("ENTRY_ID_REQUIRED", "entryId or employeeId is required"));
        }

        self.repo
            .find_latest_open_for_employee(employee_id)
            .await?
            .ok_or(AppError::NotFound { code: "ENTRY_NOT_FOUND" })
    }

    /// Lists entries newest-first, optionally filtered by employee. The raw
    /// limit is parsed leniently: non-numeric input falls back to the
    /// default, and the result is clamped to `[1, 100]`.
    #[tracing::instrument(skip(self, employee_id, raw_limit), err(level = "warn"))]
    pub async fn list_entries(&self, employee_id: Option<&str>, raw_limit: Option<&str>) -> Result<Vec<ShiftRecord>> {
        let limit = clamp_limit(raw_limit);
        let employee_id = employee_id.map(str::trim).filter(|id| !id.is_empty());
        self.repo.list(employee_id, limit).await
    }
}

fn clamp_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT)
}
