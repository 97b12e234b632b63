//! Patrol scan and anomaly queries.
//!
//! These repositories are the upstream sources of the patrol statistics
//! engine. Windows are inclusive on both ends; an unbounded window binds
//! NULL for both bounds.

use async_trait::async_trait;
use domain::models::{AnomalyRecord, PeriodWindow, ScanRecord};
use domain::services::{AnomalySource, ScanSource, StatsError};
use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

use crate::entities::{PatrolAnomalyEntity, PatrolScanEntity};
use crate::metrics::QueryTimer;

/// Repository over `patrol_scans`.
#[derive(Clone)]
pub struct PatrolScanRepository {
    pool: PgPool,
}

impl PatrolScanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Scans in the window, optionally for one officer, newest first.
    pub async fn find_in_window(
        &self,
        officer_id: Option<Uuid>,
        window: &PeriodWindow,
    ) -> Result<Vec<PatrolScanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_patrol_scans_in_window");
        let result = sqlx::query_as::<_, PatrolScanEntity>(
            r#"
            SELECT
                ps.scan_id,
                ps.officer_id,
                so.employee_id AS officer_employee_code,
                u.first_name AS officer_first_name,
                u.last_name AS officer_last_name,
                ps.qr_code_id AS location_id,
                qr.gate_name AS location_name,
                qr.location_description,
                ps.scan_timestamp,
                ps.comments
            FROM patrol_scans ps
            LEFT JOIN security_officers so ON ps.officer_id = so.officer_id
            LEFT JOIN users u ON so.officer_id = u.user_id
            LEFT JOIN qr_codes qr ON ps.qr_code_id = qr.qr_code_id
            WHERE ($1::uuid IS NULL OR ps.officer_id = $1)
              AND ($2::timestamptz IS NULL OR ps.scan_timestamp >= $2)
              AND ($3::timestamptz IS NULL OR ps.scan_timestamp <= $3)
            ORDER BY ps.scan_timestamp DESC
            "#,
        )
        .bind(officer_id)
        .bind(window.start())
        .bind(window.end())
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[async_trait]
impl ScanSource for PatrolScanRepository {
    async fn query_scans(
        &self,
        officer_id: Option<Uuid>,
        window: &PeriodWindow,
    ) -> Result<Vec<ScanRecord>, StatsError> {
        let rows = self.find_in_window(officer_id, window).await.map_err(|e| {
            error!(error = %e, "Failed to query patrol scans");
            StatsError::fetch("patrol scans", e)
        })?;

        rows.into_iter().map(ScanRecord::try_from).collect()
    }
}

/// Repository over `patrol_anomalies`.
#[derive(Clone)]
pub struct PatrolAnomalyRepository {
    pool: PgPool,
}

impl PatrolAnomalyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Anomalies detected in the window, optionally for one officer, newest first.
    pub async fn find_in_window(
        &self,
        officer_id: Option<Uuid>,
        window: &PeriodWindow,
    ) -> Result<Vec<PatrolAnomalyEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_patrol_anomalies_in_window");
        let result = sqlx::query_as::<_, PatrolAnomalyEntity>(
            r#"
            SELECT anomaly_id, officer_id, anomaly_type, detection_date, status, notes
            FROM patrol_anomalies
            WHERE ($1::uuid IS NULL OR officer_id = $1)
              AND ($2::timestamptz IS NULL OR detection_date >= $2)
              AND ($3::timestamptz IS NULL OR detection_date <= $3)
            ORDER BY detection_date DESC
            "#,
        )
        .bind(officer_id)
        .bind(window.start())
        .bind(window.end())
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Most recent anomalies of one officer.
    pub async fn find_recent_for_officer(
        &self,
        officer_id: Uuid,
        limit: i64,
    ) -> Result<Vec<PatrolAnomalyEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_recent_anomalies_for_officer");
        let result = sqlx::query_as::<_, PatrolAnomalyEntity>(
            r#"
            SELECT anomaly_id, officer_id, anomaly_type, detection_date, status, notes
            FROM patrol_anomalies
            WHERE officer_id = $1
            ORDER BY detection_date DESC
            LIMIT $2
            "#,
        )
        .bind(officer_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[async_trait]
impl AnomalySource for PatrolAnomalyRepository {
    async fn query_anomalies(
        &self,
        officer_id: Option<Uuid>,
        window: &PeriodWindow,
    ) -> Result<Vec<AnomalyRecord>, StatsError> {
        let rows = self.find_in_window(officer_id, window).await.map_err(|e| {
            error!(error = %e, "Failed to query patrol anomalies");
            StatsError::fetch("patrol anomalies", e)
        })?;

        Ok(rows.into_iter().map(AnomalyRecord::from).collect())
    }
}
