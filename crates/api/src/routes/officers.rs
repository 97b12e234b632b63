//! Security officer management.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    response::IntoResponse,
    Json,
};
use domain::models::{
    AnomalyRecord, AuditAction, ChangeOfficerStatusRequest, NewAuditEntry, OfficerSummary,
    RecentPatrol,
};
use domain::services::{notices, plan_status_change, OfficerStatusChange};
use persistence::entities::OfficerNameEntity;
use persistence::repositories::{OfficerRepository, PatrolAnomalyRepository};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::ApiResponse;
use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiKeyAuth, ClientIp};
use crate::middleware::metrics::record_admin_action;

const RECENT_PATROLS_LIMIT: i64 = 10;
const RECENT_ANOMALIES_LIMIT: i64 = 5;

async fn find_officer(repo: &OfficerRepository, officer_id: Uuid) -> Result<OfficerNameEntity, ApiError> {
    repo.find_name(officer_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Officer not found".to_string()))
}

/// GET /api/admin/officers
pub async fn list_officers(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let repo = OfficerRepository::new(state.pool.clone());
    let officers: Vec<OfficerSummary> = repo.list().await?.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::data(officers)))
}

/// GET /api/admin/officers/:officer_id
///
/// Officer with all-time patrol totals, recent patrols and recent anomalies.
pub async fn get_officer(
    State(state): State<AppState>,
    Path(officer_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = OfficerRepository::new(state.pool.clone());
    let anomalies = PatrolAnomalyRepository::new(state.pool.clone());

    let officer = repo
        .find_detail(officer_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Officer not found".to_string()))?;

    let (summary, recent, anomalies) = tokio::try_join!(
        repo.patrol_summary(officer_id),
        repo.recent_patrols(officer_id, RECENT_PATROLS_LIMIT),
        anomalies.find_recent_for_officer(officer_id, RECENT_ANOMALIES_LIMIT),
    )?;

    let detail = officer.into_detail(
        summary.into(),
        recent.into_iter().map(RecentPatrol::from).collect(),
        anomalies.into_iter().map(AnomalyRecord::from).collect(),
    );

    Ok(Json(ApiResponse::data(detail)))
}

/// PUT /api/admin/officers/:officer_id
///
/// Suspends or reactivates an officer. Members with an active subscription
/// are notified either way.
pub async fn update_officer_status(
    State(state): State<AppState>,
    Extension(auth): Extension<ApiKeyAuth>,
    Path(officer_id): Path<Uuid>,
    ClientIp(ip_address): ClientIp,
    body: Result<Json<ChangeOfficerStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
    let action = request.parsed_action().map_err(ApiError::Validation)?;
    request.validate()?;

    let repo = OfficerRepository::new(state.pool.clone());
    let officer = find_officer(&repo, officer_id).await?;

    let change = plan_status_change(
        action,
        &request,
        state.config.officers.default_suspension_days,
        state.clock.now(),
    )?;

    match change {
        OfficerStatusChange::Suspend { reason, window } => {
            let notice =
                notices::officer_suspended(officer_id, &officer.first_name, &officer.last_name, &reason);
            let audit = NewAuditEntry::new(auth.admin_id, AuditAction::SuspendOfficer, officer_id)
                .with_new_value(json!({
                    "suspension_reason": reason,
                    "suspension_start": window.start,
                    "suspension_end": window.end,
                }))
                .with_ip_address(ip_address);

            let notified = repo.suspend(officer_id, &reason, &window, &notice, &audit).await?;
            record_admin_action(AuditAction::SuspendOfficer);

            info!(
                admin_key_id = auth.api_key_id,
                officer_id = %officer_id,
                suspension_end = %window.end,
                notified,
                "Officer suspended"
            );

            Ok(Json(ApiResponse::data_with_message(
                json!(window),
                "Officer suspended successfully",
            )))
        }
        OfficerStatusChange::Activate => {
            let notice =
                notices::officer_reactivated(officer_id, &officer.first_name, &officer.last_name);
            let audit = NewAuditEntry::new(auth.admin_id, AuditAction::ActivateOfficer, officer_id)
                .with_new_value(json!({ "status": "active" }))
                .with_ip_address(ip_address);

            let notified = repo.activate(officer_id, &notice, &audit).await?;
            record_admin_action(AuditAction::ActivateOfficer);

            info!(
                admin_key_id = auth.api_key_id,
                officer_id = %officer_id,
                notified,
                "Officer reactivated"
            );

            Ok(Json(ApiResponse {
                success: true,
                data: None,
                message: Some("Officer reactivated successfully".to_string()),
            }))
        }
    }
}

/// DELETE /api/admin/officers/:officer_id
///
/// Soft delete; scan history stays attributed to the officer.
pub async fn delete_officer(
    State(state): State<AppState>,
    Extension(auth): Extension<ApiKeyAuth>,
    Path(officer_id): Path<Uuid>,
    ClientIp(ip_address): ClientIp,
) -> Result<impl IntoResponse, ApiError> {
    let repo = OfficerRepository::new(state.pool.clone());
    let officer = match repo.find_name(officer_id).await? {
        Some(officer) => officer,
        None => {
            warn!(
                admin_key_id = auth.api_key_id,
                officer_id = %officer_id,
                "Attempted to remove unknown officer"
            );
            return Err(ApiError::NotFound("Officer not found".to_string()));
        }
    };

    let notice = notices::officer_removed(officer_id, &officer.first_name, &officer.last_name);
    let audit = NewAuditEntry::new(auth.admin_id, AuditAction::DeleteOfficer, officer_id)
        .with_old_value(json!({
            "name": format!("{} {}", officer.first_name, officer.last_name),
        }))
        .with_new_value(json!({ "is_permanently_deleted": true }))
        .with_ip_address(ip_address);

    let notified = repo.soft_delete(officer_id, &notice, &audit).await?;
    record_admin_action(AuditAction::DeleteOfficer);

    info!(
        admin_key_id = auth.api_key_id,
        officer_id = %officer_id,
        notified,
        "Officer removed"
    );

    Ok(Json(ApiResponse::message("Officer removed successfully")))
}
