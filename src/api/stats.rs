use crate::api::AppState;
use crate::api::schemas::stats::StatsResponse;
use crate::error::Result;
use axum::{Json, extract::State, response::IntoResponse};

pub async fn get_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.stats_service.get_stats().await?;
    Ok(Json(StatsResponse::from(stats)))
}
