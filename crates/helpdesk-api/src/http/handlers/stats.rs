//! Statistics endpoints.
//!
//! GET /api/stats                      - Aggregate usage report.
//! GET /api/users/{user_id}/activity   - One user's history summary.
//! GET /api/trends?days=N              - Per-category daily series.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use helpdesk_core::analytics::{DEFAULT_TREND_DAYS, MAX_TREND_DAYS};
use helpdesk_types::stats::{CategoryTrends, StatisticsReport, UserActivity};

use crate::http::error::AppError;
use crate::state::AppState;

/// GET /api/stats - Aggregate usage report, computed on each call.
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatisticsReport>, AppError> {
    let report = state.analytics_service.summarize().await?;
    Ok(Json(report))
}

/// GET /api/users/{user_id}/activity - 404 when the user has no exchanges.
pub async fn get_user_activity(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserActivity>, AppError> {
    let activity = state.analytics_service.user_activity(&user_id).await?;
    Ok(Json(activity))
}

#[derive(Debug, Deserialize)]
pub struct TrendsQuery {
    pub days: Option<u32>,
}

/// GET /api/trends - Category trends over a window of 1..=365 days.
pub async fn get_trends(
    State(state): State<AppState>,
    Query(query): Query<TrendsQuery>,
) -> Result<Json<CategoryTrends>, AppError> {
    let days = query
        .days
        .unwrap_or(DEFAULT_TREND_DAYS)
        .clamp(1, MAX_TREND_DAYS);
    let trends = state.analytics_service.category_trends(days).await?;
    Ok(Json(trends))
}
