use std::sync::OnceLock;
use time::{Date, OffsetDateTime, UtcOffset};
use uuid::Uuid;

static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

fn resolve_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Resolves and caches the server-local offset. On Unix the lookup refuses
/// to run once the process is multi-threaded, so this must be called before
/// the async runtime starts its worker threads.
pub fn init_local_offset() {
    let _ = LOCAL_OFFSET.set(resolve_offset());
}

/// Server-local offset, falling back to UTC when the platform cannot
/// determine it.
#[must_use]
pub fn local_offset() -> UtcOffset {
    *LOCAL_OFFSET.get_or_init(resolve_offset)
}

/// Calendar date of a timestamp at the server-local day boundary. This is
/// the `shift_date` derivation and the aggregation key for daily stats.
#[must_use]
pub fn local_date(ts: OffsetDateTime) -> Date {
    ts.to_offset(local_offset()).date()
}

/// Lifecycle state of a shift. Persisted as the upper-case labels the
/// historical collections used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftStatus {
    Open,
    Completed,
}

impl ShiftStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Completed => "COMPLETED",
        }
    }

    /// Maps the stored label back to the enum. The column carries a CHECK
    /// constraint, so anything other than `COMPLETED` is an open shift.
    #[must_use]
    pub fn from_db(label: &str) -> Self {
        if label == "COMPLETED" { Self::Completed } else { Self::Open }
    }
}

/// One work session in the ledger. `check_in` is immutable after insert;
/// `check_out` and `worked_minutes` are set exactly once, on completion.
#[derive(Debug, Clone)]
pub struct ShiftRecord {
    pub id: Uuid,
    pub employee_id: String,
    pub shift_date: Date,
    pub check_in: OffsetDateTime,
    pub check_out: Option<OffsetDateTime>,
    pub worked_minutes: Option<i32>,
    pub status: ShiftStatus,
    pub note: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl ShiftRecord {
    /// Worked duration in hours, rounded to two decimals. Presentation-only;
    /// minutes is the stored representation.
    #[must_use]
    pub fn worked_hours(&self) -> Option<f64> {
        self.worked_minutes.map(|m| (f64::from(m) / 60.0 * 100.0).round() / 100.0)
    }
}

/// Canonical duration policy for the ledger: whole minutes, rounded up, never
/// below one minute. Clock skew and same-millisecond requests therefore yield
/// a one-minute shift instead of a zero or negative duration.
#[must_use]
pub fn worked_minutes(check_in: OffsetDateTime, check_out: OffsetDateTime) -> i32 {
    let elapsed_ms = (check_out - check_in).whole_milliseconds();
    if elapsed_ms <= 0 {
        return 1;
    }
    let minutes = (elapsed_ms + 59_999) / 60_000;
    i32::try_from(minutes.max(1)).unwrap_or(i32::MAX)
}
