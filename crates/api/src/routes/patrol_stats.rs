//! Patrol statistics report.

use axum::{
    extract::{rejection::QueryRejection, Extension, Query, State},
    response::IntoResponse,
    Json,
};
use domain::models::PatrolStatsQuery;
use domain::services::PatrolStatisticsService;
use persistence::repositories::{PatrolAnomalyRepository, PatrolScanRepository};
use tracing::info;
use validator::Validate;

use super::ApiResponse;
use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::api_key::ApiKeyAuth;
use crate::middleware::metrics::record_patrol_report;

/// GET /api/admin/patrol-stats
///
/// Query: `officer_id`, `start_date`, `end_date`, `period`
/// (day | week | month | year | all). Explicit bounds win over `period`.
pub async fn get_patrol_statistics(
    State(state): State<AppState>,
    Extension(auth): Extension<ApiKeyAuth>,
    query: Result<Query<PatrolStatsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::Validation(e.body_text()))?;
    query.validate()?;

    let service = PatrolStatisticsService::new(
        PatrolScanRepository::new(state.pool.clone()),
        PatrolAnomalyRepository::new(state.pool.clone()),
        state.clock.clone(),
        state.config.statistics.settings(),
    );

    let report = service.get_patrol_statistics(&query).await?;
    record_patrol_report(report.summary.period);

    info!(
        admin_key_id = auth.api_key_id,
        officer_id = ?query.officer_id,
        period = %report.summary.period,
        total_scans = report.summary.total_scans,
        "Patrol statistics report generated"
    );

    Ok(Json(ApiResponse::data(report)))
}
