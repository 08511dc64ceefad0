use crate::domain::shift::ShiftRecord;
use crate::error::Result;
use crate::storage::records::shift::Shift;
use sqlx::PgPool;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

const SHIFT_COLUMNS: &str =
    "id, employee_id, shift_date, check_in, check_out, worked_minutes, status, note, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct ShiftRepository {
    pool: PgPool,
}

impl ShiftRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new open shift. The partial unique index on
    /// `(employee_id) WHERE status = 'OPEN'` rejects a second open shift for
    /// the same employee; callers map that violation to a conflict.
    pub async fn create(
        &self,
        employee_id: &str,
        note: &str,
        check_in: OffsetDateTime,
        shift_date: Date,
    ) -> Result<ShiftRecord> {
        let shift = sqlx::query_as::<_, Shift>(&format!(
            r"
            INSERT INTO shifts (employee_id, shift_date, check_in, note)
            VALUES ($1, $2, $3, $4)
            RETURNING {SHIFT_COLUMNS}
            ",
        ))
        .bind(employee_id)
        .bind(shift_date)
        .bind(check_in)
        .bind(note)
        .fetch_one(&self.pool)
        .await?;

        Ok(shift.into())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ShiftRecord>> {
        let shift = sqlx::query_as::<_, Shift>(&format!(
            r"
            SELECT {SHIFT_COLUMNS}
            FROM shifts
            WHERE id = $1
            ",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shift.map(Into::into))
    }

    /// Most recent open shift for an employee. The unique index means there
    /// is at most one, but the ordering keeps the query correct even against
    /// data written before the index existed.
    pub async fn find_latest_open_for_employee(&self, employee_id: &str) -> Result<Option<ShiftRecord>> {
        let shift = sqlx::query_as::<_, Shift>(&format!(
            r"
            SELECT {SHIFT_COLUMNS}
            FROM shifts
            WHERE employee_id = $1 AND status = 'OPEN'
            ORDER BY created_at DESC
            LIMIT 1
            ",
        ))
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shift.map(Into::into))
    }

    pub async fn has_open_shift(&self, employee_id: &str) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as(
            r"
            SELECT EXISTS (
                SELECT 1 FROM shifts WHERE employee_id = $1 AND status = 'OPEN'
            )
            ",
        )
        .bind(employee_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }

    /// Conditional completion guarded by the current status. Returns `None`
    /// when no row matched, i.e. a concurrent completion won the race.
    pub async fn complete(
        &self,
        id: Uuid,
        check_out: OffsetDateTime,
        worked_minutes: i32,
    ) -> Result<Option<ShiftRecord>> {
        let shift = sqlx::query_as::<_, Shift>(&format!(
            r"
            UPDATE shifts
            SET check_out = $2,
                worked_minutes = $3,
                status = 'COMPLETED',
                updated_at = NOW()
            WHERE id = $1 AND status = 'OPEN'
            RETURNING {SHIFT_COLUMNS}
            ",
        ))
        .bind(id)
        .bind(check_out)
        .bind(worked_minutes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shift.map(Into::into))
    }

    pub async fn list(&self, employee_id: Option<&str>, limit: i64) -> Result<Vec<ShiftRecord>> {
        let shifts = match employee_id {
            Some(employee_id) => {
                sqlx::query_as::<_, Shift>(&format!(
                    r"
                    SELECT {SHIFT_COLUMNS}
                    FROM shifts
                    WHERE employee_id = $1
                    ORDER BY created_at DESC
                    LIMIT $2
                    ",
                ))
                .bind(employee_id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Shift>(&format!(
                    r"
                    SELECT {SHIFT_COLUMNS}
                    FROM shifts
                    ORDER BY created_at DESC
                    LIMIT $1
                    ",
                ))
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(shifts.into_iter().map(Into::into).collect())
    }

    pub async fn count_open(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM shifts WHERE status = 'OPEN'")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    /// Total completed minutes for shifts whose calendar date matches `day`.
    pub async fn minutes_completed_on(&self, day: Date) -> Result<i64> {
        let total: (i64,) = sqlx::query_as(
            r"
            SELECT COALESCE(SUM(worked_minutes), 0)::BIGINT
            FROM shifts
            WHERE status = 'COMPLETED' AND shift_date = $1
            ",
        )
        .bind(day)
        .fetch_one(&self.pool)
        .await?;
        Ok(total.0)
    }
}
