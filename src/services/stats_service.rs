use crate::domain::shift::local_date;
use crate::error::Result;
use crate::storage::shift_repo::ShiftRepository;
use crate::storage::user_repo::UserRepository;
use time::OffsetDateTime;

/// Daily dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    /// Total user records. The historical dashboard labeled this "active
    /// employees" even though it is not a clocked-in count; the behavior is
    /// kept so the field keeps meaning the same thing.
    pub active_employees: i64,
    /// Hours from shifts completed today (server-local day), 2 decimals.
    pub hours_today: f64,
    /// Open shifts across all employees and all dates.
    pub pending: i64,
}

#[derive(Clone, Debug)]
pub struct StatsService {
    shift_repo: ShiftRepository,
    user_repo: UserRepository,
}

impl StatsService {
    #[must_use]
    pub const fn new(shift_repo: ShiftRepository, user_repo: UserRepository) -> Self {
        Self { shift_repo, user_repo }
    }

    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn get_stats(&self) -> Result<Stats> {
        let today = local_date(OffsetDateTime::now_utc());

        let active_employees = self.user_repo.count().await?;
        let minutes_today = self.shift_repo.minutes_completed_on(today).await?;
        let pending = self.shift_repo.count_open().await?;

        Ok(Stats {
            active_employees,
            hours_today: minutes_to_hours(minutes_today),
            pending,
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn minutes_to_hours(minutes: i64) -> f64 {
    (minutes as f64 / 60.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_round_to_two_decimals() {
        assert_eq!(minutes_to_hours(0), 0.0);
        assert_eq!(minutes_to_hours(120), 2.0);
        assert_eq!(minutes_to_hours(90), 1.5);
        assert_eq!(minutes_to_hours(125), 2.08);
        assert_eq!(minutes_to_hours(1), 0.02);
    }
}
