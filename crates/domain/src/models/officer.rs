//! Security officer domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::patrol::AnomalyRecord;

/// Account status stored on the `users` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Suspended,
    Deleted,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Suspended => "suspended",
            UserStatus::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Officer as listed in the back-office.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfficerSummary {
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

/// All-time patrol totals for one officer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfficerPatrolSummary {
    pub total_scans: i64,
    pub unique_locations: i64,
    pub first_patrol: Option<DateTime<Utc>>,
    pub last_patrol: Option<DateTime<Utc>>,
}

/// A recent scan with its gate name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentPatrol {
    pub scan_id: Uuid,
    pub scan_timestamp: DateTime<Utc>,
    pub comments: Option<String>,
    pub gate_name: Option<String>,
    pub location_description: Option<String>,
}

/// Officer detail page payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfficerDetail {
    #[serde(flatten)]
    pub officer: OfficerSummary,
    pub approved_by_admin_id: Option<Uuid>,
    pub user_created_at: DateTime<Utc>,
    pub patrol_stats: OfficerPatrolSummary,
    pub recent_patrols: Vec<RecentPatrol>,
    pub anomalies: Vec<AnomalyRecord>,
}

/// Status transition requested for an officer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfficerStatusAction {
    Suspend,
    Activate,
}

impl FromStr for OfficerStatusAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "suspend" => Ok(OfficerStatusAction::Suspend),
            "activate" => Ok(OfficerStatusAction::Activate),
            _ => Err("Invalid action. Must be 'suspend' or 'activate'".to_string()),
        }
    }
}

/// Request body for `PUT /api/admin/officers/:id`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ChangeOfficerStatusRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500, message = "Suspension reason must be at most 500 characters"))]
    pub suspension_reason: Option<String>,
    #[serde(default)]
    #[validate(range(
        min = 1,
        max = 3650,
        message = "Suspension duration must be between 1 and 3650 days"
    ))]
    pub suspension_duration_days: Option<i64>,
}

impl ChangeOfficerStatusRequest {
    /// Parses the requested action; a missing action is as invalid as an unknown one.
    pub fn parsed_action(&self) -> Result<OfficerStatusAction, String> {
        self.action.as_deref().unwrap_or_default().parse()
    }
}

/// Start and end of an officer suspension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspensionWindow {
    #[serde(rename = "suspension_start")]
    pub start: DateTime<Utc>,
    #[serde(rename = "suspension_end")]
    pub end: DateTime<Utc>,
}
