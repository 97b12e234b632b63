//! Repository for security officer operations.

use domain::models::{NewAuditEntry, Notice, SuspensionWindow, UserStatus};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::{audit_log::insert_audit_entry, notification::insert_notice};
use crate::entities::{
    OfficerDetailEntity, OfficerEntity, OfficerNameEntity, OfficerPatrolSummaryEntity,
    RecentPatrolEntity,
};
use crate::metrics::QueryTimer;

/// Repository for security officer operations.
#[derive(Clone)]
pub struct OfficerRepository {
    pool: PgPool,
}

impl OfficerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Non-deleted officers, newest first.
    pub async fn list(&self) -> Result<Vec<OfficerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_officers");
        let result = sqlx::query_as::<_, OfficerEntity>(
            r#"
            SELECT
                so.officer_id, so.employee_id,
                so.suspension_start_date, so.suspension_end_date, so.suspension_reason,
                so.is_permanently_deleted, so.created_at, so.updated_at,
                u.email, u.phone_number, u.first_name, u.last_name,
                u.status, u.is_approved, u.last_login
            FROM security_officers so
            JOIN users u ON so.officer_id = u.user_id
            WHERE so.is_permanently_deleted = false
            ORDER BY so.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// A non-deleted officer with approval and account details.
    pub async fn find_detail(&self, officer_id: Uuid) -> Result<Option<OfficerDetailEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_officer_detail");
        let result = sqlx::query_as::<_, OfficerDetailEntity>(
            r#"
            SELECT
                so.officer_id, so.employee_id,
                so.suspension_start_date, so.suspension_end_date, so.suspension_reason,
                so.is_permanently_deleted, so.approved_by_admin_id, so.created_at, so.updated_at,
                u.email, u.phone_number, u.first_name, u.last_name,
                u.status, u.is_approved, u.last_login,
                u.created_at AS user_created_at
            FROM security_officers so
            JOIN users u ON so.officer_id = u.user_id
            WHERE so.officer_id = $1 AND so.is_permanently_deleted = false
            "#,
        )
        .bind(officer_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Name of a non-deleted officer.
    pub async fn find_name(&self, officer_id: Uuid) -> Result<Option<OfficerNameEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_officer_name");
        let result = sqlx::query_as::<_, OfficerNameEntity>(
            r#"
            SELECT so.officer_id, u.first_name, u.last_name
            FROM security_officers so
            JOIN users u ON so.officer_id = u.user_id
            WHERE so.officer_id = $1 AND so.is_permanently_deleted = false
            "#,
        )
        .bind(officer_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All-time scan totals of one officer.
    pub async fn patrol_summary(&self, officer_id: Uuid) -> Result<OfficerPatrolSummaryEntity, sqlx::Error> {
        let timer = QueryTimer::new("officer_patrol_summary");
        let result = sqlx::query_as::<_, OfficerPatrolSummaryEntity>(
            r#"
            SELECT
                COUNT(*) AS total_scans,
                COUNT(DISTINCT qr_code_id) AS unique_locations,
                MIN(scan_timestamp) AS first_patrol,
                MAX(scan_timestamp) AS last_patrol
            FROM patrol_scans
            WHERE officer_id = $1
            "#,
        )
        .bind(officer_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Most recent scans of one officer with their gate names.
    pub async fn recent_patrols(
        &self,
        officer_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RecentPatrolEntity>, sqlx::Error> {
        let timer = QueryTimer::new("officer_recent_patrols");
        let result = sqlx::query_as::<_, RecentPatrolEntity>(
            r#"
            SELECT ps.scan_id, ps.scan_timestamp, ps.comments, qr.gate_name, qr.location_description
            FROM patrol_scans ps
            JOIN qr_codes qr ON ps.qr_code_id = qr.qr_code_id
            WHERE ps.officer_id = $1
            ORDER BY ps.scan_timestamp DESC
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

    /// Suspends an officer, notifies subscribers and writes the audit row atomically.
    ///
    /// Returns the number of notifications written.
    pub async fn suspend(
        &self,
        officer_id: Uuid,
        reason: &str,
        window: &SuspensionWindow,
        notice: &Notice,
        audit: &NewAuditEntry,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("suspend_officer");
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE security_officers
            SET suspension_start_date = $2, suspension_end_date = $3, suspension_reason = $4
            WHERE officer_id = $1
            "#,
        )
        .bind(officer_id)
        .bind(window.start)
        .bind(window.end)
        .bind(reason)
        .execute(&mut *tx)
        .await?;

        set_user_status(&mut tx, officer_id, UserStatus::Suspended).await?;
        let notified = insert_notice(&mut tx, notice).await?;
        insert_audit_entry(&mut tx, audit).await?;

        tx.commit().await?;
        timer.record();
        Ok(notified)
    }

    /// Lifts a suspension, notifies subscribers and writes the audit row atomically.
    pub async fn activate(
        &self,
        officer_id: Uuid,
        notice: &Notice,
        audit: &NewAuditEntry,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("activate_officer");
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE security_officers
            SET suspension_start_date = NULL, suspension_end_date = NULL, suspension_reason = NULL
            WHERE officer_id = $1
            "#,
        )
        .bind(officer_id)
        .execute(&mut *tx)
        .await?;

        set_user_status(&mut tx, officer_id, UserStatus::Active).await?;
        let notified = insert_notice(&mut tx, notice).await?;
        insert_audit_entry(&mut tx, audit).await?;

        tx.commit().await?;
        timer.record();
        Ok(notified)
    }

    /// Marks an officer permanently deleted. Scan history is kept.
    pub async fn soft_delete(
        &self,
        officer_id: Uuid,
        notice: &Notice,
        audit: &NewAuditEntry,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("soft_delete_officer");
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE security_officers SET is_permanently_deleted = true WHERE officer_id = $1")
            .bind(officer_id)
            .execute(&mut *tx)
            .await?;

        set_user_status(&mut tx, officer_id, UserStatus::Deleted).await?;
        let notified = insert_notice(&mut tx, notice).await?;
        insert_audit_entry(&mut tx, audit).await?;

        tx.commit().await?;
        timer.record();
        Ok(notified)
    }
}

async fn set_user_status(
    conn: &mut PgConnection,
    user_id: Uuid,
    status: UserStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET status = $2 WHERE user_id = $1")
        .bind(user_id)
        .bind(status.as_str())
        .execute(&mut *conn)
        .await?;
    Ok(())
}
