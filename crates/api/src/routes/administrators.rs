//! Administrator account management.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::administrator::ALL_FIELDS_REQUIRED;
use domain::models::{
    AdministratorRecord, AdministratorResponse, AuditAction, CreateAdministratorRequest,
    NewAuditEntry,
};
use persistence::repositories::AdministratorRepository;
use serde_json::json;
use shared::password::hash_password;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::ApiResponse;
use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiKeyAuth, ClientIp};
use crate::middleware::metrics::record_admin_action;

/// Whether the acting key's administrator may modify system configuration.
/// Keys without a linked administrator never can.
async fn caller_can_modify_system_config(
    repo: &AdministratorRepository,
    auth: &ApiKeyAuth,
) -> Result<bool, ApiError> {
    let Some(admin_id) = auth.admin_id else {
        return Ok(false);
    };
    Ok(repo
        .find_by_id(admin_id)
        .await?
        .is_some_and(|admin| admin.can_modify_system_config))
}

/// POST /api/admin/administrators
///
/// Creates an administrator account owned by the calling administrator.
pub async fn create_administrator(
    State(state): State<AppState>,
    Extension(auth): Extension<ApiKeyAuth>,
    ClientIp(ip_address): ClientIp,
    body: Result<Json<CreateAdministratorRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
    if !request.has_required_fields() {
        return Err(ApiError::Validation(ALL_FIELDS_REQUIRED.to_string()));
    }
    request.validate()?;

    let (new_admin, password) = request
        .into_new_administrator(auth.admin_id)
        .map_err(ApiError::Validation)?;

    let repo = AdministratorRepository::new(state.pool.clone());
    if repo.email_exists(&new_admin.email).await? {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let user_id = Uuid::new_v4();
    let audit = NewAuditEntry::new(auth.admin_id, AuditAction::CreateAdmin, user_id)
        .with_new_value(json!({
            "email": new_admin.email,
            "can_modify_system_config": new_admin.can_modify_system_config,
        }))
        .with_ip_address(ip_address);

    let created = repo.create(user_id, &new_admin, &password_hash, &audit).await?;
    record_admin_action(AuditAction::CreateAdmin);

    info!(
        admin_key_id = auth.api_key_id,
        new_admin_id = %created.user_id,
        can_modify_system_config = new_admin.can_modify_system_config,
        "Administrator account created"
    );

    let response = AdministratorResponse {
        user_id: created.user_id,
        email: created.email,
        first_name: created.first_name,
        last_name: created.last_name,
        phone_number: created.phone_number.unwrap_or(new_admin.phone_number),
        user_type: created.user_type,
        can_modify_system_config: new_admin.can_modify_system_config,
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data_with_message(
            response,
            "Admin account created successfully",
        )),
    ))
}

/// DELETE /api/admin/administrators/:admin_id
pub async fn delete_administrator(
    State(state): State<AppState>,
    Extension(auth): Extension<ApiKeyAuth>,
    Path(admin_id): Path<Uuid>,
    ClientIp(ip_address): ClientIp,
) -> Result<impl IntoResponse, ApiError> {
    if auth.admin_id == Some(admin_id) {
        return Err(ApiError::Validation(
            "You cannot delete your own admin account".to_string(),
        ));
    }

    let repo = AdministratorRepository::new(state.pool.clone());
    let target: AdministratorRecord = repo
        .find_by_id(admin_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Admin not found".to_string()))?
        .into();

    if target.can_modify_system_config && !caller_can_modify_system_config(&repo, &auth).await? {
        warn!(
            admin_key_id = auth.api_key_id,
            target_admin_id = %admin_id,
            "Refused removal of privileged administrator"
        );
        return Err(ApiError::Forbidden(
            "You don't have permission to remove an admin with system configuration privileges"
                .to_string(),
        ));
    }

    let created_count = repo.count_created_by(admin_id).await?;
    if created_count > 0 {
        return Err(ApiError::Validation(format!(
            "Cannot delete admin. This admin has created {} other admin account(s). Please reassign or remove those accounts first.",
            created_count
        )));
    }

    let audit = NewAuditEntry::new(auth.admin_id, AuditAction::DeleteAdmin, admin_id)
        .with_old_value(json!({
            "email": target.email,
            "name": target.full_name(),
            "can_modify_system_config": target.can_modify_system_config,
        }))
        .with_ip_address(ip_address);

    repo.delete(admin_id, &audit).await?;
    record_admin_action(AuditAction::DeleteAdmin);

    info!(
        admin_key_id = auth.api_key_id,
        removed_admin_id = %admin_id,
        "Administrator account removed"
    );

    Ok(Json(ApiResponse::message("Admin account removed successfully")))
}
