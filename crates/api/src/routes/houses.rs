//! Houses under patrol monitoring.

use axum::{
    body::Bytes,
    extract::{Extension, Path, State},
    response::IntoResponse,
    Json,
};
use domain::models::{
    AuditAction, HousePatrol, HouseStatus, HouseSummary, NewAuditEntry, PaymentRecord,
    RemoveHouseRequest,
};
use domain::services::notices::{self, HouseAddress};
use persistence::entities::HouseContactEntity;
use persistence::repositories::{HouseRepository, HouseStatusEffects};
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::ApiResponse;
use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiKeyAuth, ClientIp};
use crate::middleware::metrics::record_admin_action;

const PATROL_HISTORY_LIMIT: i64 = 20;
const PAYMENT_HISTORY_LIMIT: i64 = 12;

async fn find_house(repo: &HouseRepository, house_id: Uuid) -> Result<HouseContactEntity, ApiError> {
    repo.find_contact(house_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("House not found".to_string()))
}

/// Like [`find_house`], but a deleted house counts as missing.
async fn find_monitored_house(
    repo: &HouseRepository,
    house_id: Uuid,
) -> Result<HouseContactEntity, ApiError> {
    let house = find_house(repo, house_id).await?;
    if house.status == HouseStatus::Deleted.as_str() {
        return Err(ApiError::NotFound("House not found".to_string()));
    }
    Ok(house)
}

fn address(house: &HouseContactEntity) -> HouseAddress<'_> {
    HouseAddress {
        house_id: house.house_id,
        house_number: &house.house_number,
        street_address: &house.street_address,
    }
}

/// The removal body is optional; an empty body means no custom reason.
fn parse_remove_request(body: &Bytes) -> Result<RemoveHouseRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RemoveHouseRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::Validation(format!("Invalid request body: {}", e)))
}

/// GET /api/admin/houses
pub async fn list_houses(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let repo = HouseRepository::new(state.pool.clone());
    let houses: Vec<HouseSummary> = repo.list().await?.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::data(houses)))
}

/// GET /api/admin/houses/:house_id
///
/// House with the latest scans of its gate and the member's latest payments.
pub async fn get_house(
    State(state): State<AppState>,
    Path(house_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = HouseRepository::new(state.pool.clone());

    let house = repo
        .find_detail(house_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("House not found".to_string()))?;

    let patrol_history: Vec<HousePatrol> = match house.qr_code_id {
        Some(qr_code_id) => repo
            .patrol_history(qr_code_id, PATROL_HISTORY_LIMIT)
            .await?
            .into_iter()
            .map(Into::into)
            .collect(),
        None => Vec::new(),
    };

    let payment_history: Vec<PaymentRecord> = match house.member_id {
        Some(member_id) => repo
            .payment_history(member_id, PAYMENT_HISTORY_LIMIT)
            .await?
            .into_iter()
            .map(Into::into)
            .collect(),
        None => Vec::new(),
    };

    Ok(Json(ApiResponse::data(
        house.into_detail(patrol_history, payment_history),
    )))
}

/// DELETE /api/admin/houses/:house_id
///
/// Suspends monitoring of a house and its member's subscription.
/// Body: optional `{ "reason": "..." }` sent to the member instead of the
/// default text.
pub async fn remove_house(
    State(state): State<AppState>,
    Extension(auth): Extension<ApiKeyAuth>,
    Path(house_id): Path<Uuid>,
    ClientIp(ip_address): ClientIp,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request = parse_remove_request(&body)?;
    request.validate()?;

    let repo = HouseRepository::new(state.pool.clone());
    let house = find_monitored_house(&repo, house_id).await?;
    let address = address(&house);
    let reason = request.reason();

    let member_notice = house
        .member_id
        .map(|member_id| notices::house_removed_for_member(member_id, &address, reason));
    let officer_notice = notices::house_removed_for_officers(&address);
    let audit = NewAuditEntry::new(auth.admin_id, AuditAction::RemoveHouse, house_id)
        .with_old_value(json!({ "status": house.status }))
        .with_new_value(json!({
            "status": HouseStatus::Suspended.as_str(),
            "reason": reason,
        }))
        .with_ip_address(ip_address);

    let notified = repo
        .suspend(
            house_id,
            house.member_id,
            HouseStatusEffects {
                member_notice: member_notice.as_ref(),
                officer_notice: &officer_notice,
                audit: &audit,
            },
        )
        .await?;
    record_admin_action(AuditAction::RemoveHouse);

    info!(
        admin_key_id = auth.api_key_id,
        house_id = %house_id,
        member_id = ?house.member_id,
        notified,
        "House removed from monitoring"
    );

    Ok(Json(ApiResponse::message(
        "House removed from monitoring successfully",
    )))
}

/// PUT /api/admin/houses/:house_id
///
/// Reinstates a suspended house and reactivates its member's subscription.
pub async fn reinstate_house(
    State(state): State<AppState>,
    Extension(auth): Extension<ApiKeyAuth>,
    Path(house_id): Path<Uuid>,
    ClientIp(ip_address): ClientIp,
) -> Result<impl IntoResponse, ApiError> {
    let repo = HouseRepository::new(state.pool.clone());
    let house = find_house(&repo, house_id).await?;

    if house.status == HouseStatus::Active.as_str() {
        return Err(ApiError::Validation(
            "House is already active in monitoring".to_string(),
        ));
    }

    let address = address(&house);
    let member_notice = house
        .member_id
        .map(|member_id| notices::house_reinstated_for_member(member_id, &address));
    let officer_notice = notices::house_reinstated_for_officers(&address);
    let audit = NewAuditEntry::new(auth.admin_id, AuditAction::ReinstateHouse, house_id)
        .with_old_value(json!({ "status": house.status }))
        .with_new_value(json!({ "status": HouseStatus::Active.as_str() }))
        .with_ip_address(ip_address);

    let notified = repo
        .reinstate(
            house_id,
            house.member_id,
            HouseStatusEffects {
                member_notice: member_notice.as_ref(),
                officer_notice: &officer_notice,
                audit: &audit,
            },
        )
        .await?;
    record_admin_action(AuditAction::ReinstateHouse);

    info!(
        admin_key_id = auth.api_key_id,
        house_id = %house_id,
        previous_status = %house.status,
        notified,
        "House reinstated for monitoring"
    );

    Ok(Json(ApiResponse::message(
        "House reinstated for monitoring successfully",
    )))
}
