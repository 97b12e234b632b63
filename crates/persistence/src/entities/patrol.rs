//! Patrol scan and anomaly entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::{AnomalyRecord, ScanRecord};
use domain::services::StatsError;
use sqlx::FromRow;
use uuid::Uuid;

/// A `patrol_scans` row joined with officer and QR code display fields.
///
/// The foreign keys are nullable in the schema, so they stay optional here
/// and are checked when converting into a [`ScanRecord`].
#[derive(Debug, Clone, FromRow)]
pub struct PatrolScanEntity {
    pub scan_id: Uuid,
    pub officer_id: Option<Uuid>,
    pub officer_employee_code: Option<String>,
    pub officer_first_name: Option<String>,
    pub officer_last_name: Option<String>,
    pub location_id: Option<Uuid>,
    pub location_name: Option<String>,
    pub location_description: Option<String>,
    pub scan_timestamp: Option<DateTime<Utc>>,
    pub comments: Option<String>,
}

impl TryFrom<PatrolScanEntity> for ScanRecord {
    type Error = StatsError;

    fn try_from(entity: PatrolScanEntity) -> Result<Self, Self::Error> {
        let missing = |field: &str| {
            StatsError::InvariantViolation(format!(
                "patrol scan {} has no {}",
                entity.scan_id, field
            ))
        };

        let officer_id = entity.officer_id.ok_or_else(|| missing("officer_id"))?;
        let location_id = entity.location_id.ok_or_else(|| missing("qr_code_id"))?;
        let scan_timestamp = entity.scan_timestamp.ok_or_else(|| missing("scan_timestamp"))?;

        Ok(ScanRecord {
            scan_id: entity.scan_id,
            officer_id,
            officer_employee_code: entity.officer_employee_code,
            officer_first_name: entity.officer_first_name,
            officer_last_name: entity.officer_last_name,
            location_id,
            location_name: entity.location_name,
            location_description: entity.location_description,
            scan_timestamp,
            comments: entity.comments,
        })
    }
}

/// Database row mapping for the patrol_anomalies table.
#[derive(Debug, Clone, FromRow)]
pub struct PatrolAnomalyEntity {
    pub anomaly_id: Uuid,
    pub officer_id: Option<Uuid>,
    pub anomaly_type: String,
    pub detection_date: DateTime<Utc>,
    pub status: String,
    pub notes: Option<String>,
}

impl From<PatrolAnomalyEntity> for AnomalyRecord {
    fn from(entity: PatrolAnomalyEntity) -> Self {
        Self {
            anomaly_id: entity.anomaly_id,
            officer_id: entity.officer_id,
            anomaly_type: entity.anomaly_type,
            detection_date: entity.detection_date,
            status: entity.status,
            notes: entity.notes,
        }
    }
}
