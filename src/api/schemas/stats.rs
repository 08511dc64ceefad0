use crate::services::stats_service::Stats;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub active_employees: i64,
    pub hours_today: f64,
    pub pending: i64,
}

impl From<Stats> for StatsResponse {
    fn from(stats: Stats) -> Self {
        Self {
            active_employees: stats.active_employees,
            hours_today: stats.hours_today,
            pending: stats.pending,
        }
    }
}
