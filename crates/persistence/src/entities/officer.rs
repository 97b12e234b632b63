//! Security officer entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::{
    AnomalyRecord, OfficerDetail, OfficerPatrolSummary, OfficerSummary, RecentPatrol,
};
use sqlx::FromRow;
use uuid::Uuid;

/// `security_officers` joined with its `users` row.
#[derive(Debug, Clone, FromRow)]
pub struct OfficerEntity {
    pub officer_id: Uuid,
    pub employee_id: Option<String>,
    pub suspension_start_date: Option<DateTime<Utc>>,
    pub suspension_end_date: Option<DateTime<Utc>>,
    pub suspension_reason: Option<String>,
    pub is_permanently_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub phone_number: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub status: String,
    pub is_approved: bool,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<OfficerEntity> for OfficerSummary {
    fn from(entity: OfficerEntity) -> Self {
        Self {
            officer_id: entity.officer_id,
            employee_id: entity.employee_id,
            suspension_start_date: entity.suspension_start_date,
            suspension_end_date: entity.suspension_end_date,
            suspension_reason: entity.suspension_reason,
            is_permanently_deleted: entity.is_permanently_deleted,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            email: entity.email,
            phone_number: entity.phone_number,
            first_name: entity.first_name,
            last_name: entity.last_name,
            status: entity.status,
            is_approved: entity.is_approved,
            last_login: entity.last_login,
        }
    }
}

/// Officer detail row: the list columns plus approval and account creation.
#[derive(Debug, Clone, FromRow)]
pub struct OfficerDetailEntity {
    #[sqlx(flatten)]
    pub officer: OfficerEntity,
    pub approved_by_admin_id: Option<Uuid>,
    pub user_created_at: DateTime<Utc>,
}

impl OfficerDetailEntity {
    pub fn into_detail(
        self,
        patrol_stats: OfficerPatrolSummary,
        recent_patrols: Vec<RecentPatrol>,
        anomalies: Vec<AnomalyRecord>,
    ) -> OfficerDetail {
        OfficerDetail {
            officer: self.officer.into(),
            approved_by_admin_id: self.approved_by_admin_id,
            user_created_at: self.user_created_at,
            patrol_stats,
            recent_patrols,
            anomalies,
        }
    }
}

/// Just enough of an officer to address notices.
#[derive(Debug, Clone, FromRow)]
pub struct OfficerNameEntity {
    pub officer_id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

/// Aggregate row over an officer's scans.
#[derive(Debug, Clone, FromRow)]
pub struct OfficerPatrolSummaryEntity {
    pub total_scans: i64,
    pub unique_locations: i64,
    pub first_patrol: Option<DateTime<Utc>>,
    pub last_patrol: Option<DateTime<Utc>>,
}

impl From<OfficerPatrolSummaryEntity> for OfficerPatrolSummary {
    fn from(entity: OfficerPatrolSummaryEntity) -> Self {
        Self {
            total_scans: entity.total_scans,
            unique_locations: entity.unique_locations,
            first_patrol: entity.first_patrol,
            last_patrol: entity.last_patrol,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct RecentPatrolEntity {
    pub scan_id: Uuid,
    pub scan_timestamp: DateTime<Utc>,
    pub comments: Option<String>,
    pub gate_name: Option<String>,
    pub location_description: Option<String>,
}

impl From<RecentPatrolEntity> for RecentPatrol {
    fn from(entity: RecentPatrolEntity) -> Self {
        Self {
            scan_id: entity.scan_id,
            scan_timestamp: entity.scan_timestamp,
            comments: entity.comments,
            gate_name: entity.gate_name,
            location_description: entity.location_description,
        }
    }
}
