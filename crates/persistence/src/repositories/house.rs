//! Repository for houses under patrol monitoring.

use domain::models::{HouseStatus, NewAuditEntry, Notice};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::{audit_log::insert_audit_entry, notification::insert_notice};
use crate::entities::{
    HouseContactEntity, HouseDetailEntity, HousePatrolEntity, HouseSummaryEntity, PaymentEntity,
};
use crate::metrics::QueryTimer;

/// Notices and audit row written with a house status change.
pub struct HouseStatusEffects<'a> {
    pub member_notice: Option<&'a Notice>,
    pub officer_notice: &'a Notice,
    pub audit: &'a NewAuditEntry,
}

/// Repository for house operations.
#[derive(Clone)]
pub struct HouseRepository {
    pool: PgPool,
}

impl HouseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Non-deleted houses with their gate and member, newest first.
    pub async fn list(&self) -> Result<Vec<HouseSummaryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_houses");
        let result = sqlx::query_as::<_, HouseSummaryEntity>(
            r#"
            SELECT
                h.house_id, h.house_number, h.street_address, h.status, h.created_at, h.updated_at,
                qr.qr_code_value, qr.gate_name, qr.is_active AS qr_active,
                u.first_name AS member_first_name, u.last_name AS member_last_name,
                u.email AS member_email, u.phone_number AS member_phone,
                s.status AS subscription_status, s.missed_payments_count
            FROM houses h
            LEFT JOIN qr_codes qr ON h.qr_code_id = qr.qr_code_id
            LEFT JOIN neighborhood_members nm ON h.member_id = nm.member_id
            LEFT JOIN users u ON nm.member_id = u.user_id
            LEFT JOIN subscriptions s ON nm.member_id = s.member_id AND s.status != 'cancelled'
            WHERE h.status != 'deleted'
            ORDER BY h.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// One house with gate, member and subscription details.
    pub async fn find_detail(&self, house_id: Uuid) -> Result<Option<HouseDetailEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_house_detail");
        let result = sqlx::query_as::<_, HouseDetailEntity>(
            r#"
            SELECT
                h.house_id, h.house_number, h.street_address, h.status, h.created_at, h.updated_at,
                qr.qr_code_id, qr.qr_code_value, qr.gate_name, qr.location_description,
                qr.is_active AS qr_active,
                nm.member_id,
                u.first_name AS member_first_name, u.last_name AS member_last_name,
                u.email AS member_email, u.phone_number AS member_phone,
                nm.subscription_status AS member_subscription_status,
                nm.subscription_start_date, nm.last_payment_date,
                s.monthly_fee::float8 AS monthly_fee, s.missed_payments_count,
                s.status AS subscription_status
            FROM houses h
            LEFT JOIN qr_codes qr ON h.qr_code_id = qr.qr_code_id
            LEFT JOIN neighborhood_members nm ON h.member_id = nm.member_id
            LEFT JOIN users u ON nm.member_id = u.user_id
            LEFT JOIN subscriptions s ON nm.member_id = s.member_id AND s.status != 'cancelled'
            WHERE h.house_id = $1
            LIMIT 1
            "#,
        )
        .bind(house_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Most recent scans of a gate QR code.
    pub async fn patrol_history(
        &self,
        qr_code_id: Uuid,
        limit: i64,
    ) -> Result<Vec<HousePatrolEntity>, sqlx::Error> {
        let timer = QueryTimer::new("house_patrol_history");
        let result = sqlx::query_as::<_, HousePatrolEntity>(
            r#"
            SELECT
                ps.scan_id, ps.scan_timestamp, ps.comments,
                u.first_name AS officer_first_name, u.last_name AS officer_last_name,
                so.employee_id
            FROM patrol_scans ps
            LEFT JOIN security_officers so ON ps.officer_id = so.officer_id
            LEFT JOIN users u ON so.officer_id = u.user_id
            WHERE ps.qr_code_id = $1
            ORDER BY ps.scan_timestamp DESC
            LIMIT $2
            "#,
        )
        .bind(qr_code_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Most recent payments of a member.
    pub async fn payment_history(
        &self,
        member_id: Uuid,
        limit: i64,
    ) -> Result<Vec<PaymentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("member_payment_history");
        let result = sqlx::query_as::<_, PaymentEntity>(
            r#"
            SELECT payment_id, amount::float8 AS amount, payment_method, payment_status,
                   payment_date, month_paid_for
            FROM payments
            WHERE member_id = $1
            ORDER BY payment_date DESC
            LIMIT $2
            "#,
        )
        .bind(member_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Address, status and member of a house.
    pub async fn find_contact(&self, house_id: Uuid) -> Result<Option<HouseContactEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_house_contact");
        let result = sqlx::query_as::<_, HouseContactEntity>(
            "SELECT house_id, house_number, street_address, status, member_id FROM houses WHERE house_id = $1",
        )
        .bind(house_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Takes a house out of monitoring and suspends the member's active subscription.
    ///
    /// Returns the number of notifications written.
    pub async fn suspend(
        &self,
        house_id: Uuid,
        member_id: Option<Uuid>,
        effects: HouseStatusEffects<'_>,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("suspend_house");
        let mut tx = self.pool.begin().await?;

        set_house_status(&mut tx, house_id, HouseStatus::Suspended).await?;

        if let Some(member_id) = member_id {
            sqlx::query(
                "UPDATE subscriptions SET status = 'suspended' WHERE member_id = $1 AND status = 'active'",
            )
            .bind(member_id)
            .execute(&mut *tx)
            .await?;
            set_member_subscription_status(&mut tx, member_id, "suspended").await?;
        }

        let notified = write_effects(&mut tx, &effects).await?;

        tx.commit().await?;
        timer.record();
        Ok(notified)
    }

    /// Puts a house back under monitoring and reactivates the member's suspended subscription.
    pub async fn reinstate(
        &self,
        house_id: Uuid,
        member_id: Option<Uuid>,
        effects: HouseStatusEffects<'_>,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("reinstate_house");
        let mut tx = self.pool.begin().await?;

        set_house_status(&mut tx, house_id, HouseStatus::Active).await?;

        if let Some(member_id) = member_id {
            sqlx::query(
                r#"
                UPDATE subscriptions
                SET status = 'active', missed_payments_count = 0
                WHERE member_id = $1 AND status = 'suspended'
                "#,
            )
            .bind(member_id)
            .execute(&mut *tx)
            .await?;
            set_member_subscription_status(&mut tx, member_id, "active").await?;
        }

        let notified = write_effects(&mut tx, &effects).await?;

        tx.commit().await?;
        timer.record();
        Ok(notified)
    }
}

async fn set_house_status(
    conn: &mut PgConnection,
    house_id: Uuid,
    status: HouseStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE houses SET status = $2 WHERE house_id = $1")
        .bind(house_id)
        .bind(status.as_str())
        .execute(&mut *conn)
        .await?;
    Ok(())
}

async fn set_member_subscription_status(
    conn: &mut PgConnection,
    member_id: Uuid,
    status: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE neighborhood_members SET subscription_status = $2 WHERE member_id = $1")
        .bind(member_id)
        .bind(status)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

async fn write_effects(
    conn: &mut PgConnection,
    effects: &HouseStatusEffects<'_>,
) -> Result<u64, sqlx::Error> {
    let mut notified = 0;
    if let Some(notice) = effects.member_notice {
        notified += insert_notice(conn, notice).await?;
    }
    notified += insert_notice(conn, effects.officer_notice).await?;
    insert_audit_entry(conn, effects.audit).await?;
    Ok(notified)
}
