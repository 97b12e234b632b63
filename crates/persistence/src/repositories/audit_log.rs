//! Audit rows written inside back-office transactions.

use domain::models::NewAuditEntry;
use sqlx::PgConnection;

use crate::metrics::QueryTimer;

/// Inserts one audit row on `conn`, normally an open transaction.
pub async fn insert_audit_entry(
    conn: &mut PgConnection,
    entry: &NewAuditEntry,
) -> Result<(), sqlx::Error> {
    let timer = QueryTimer::new("insert_audit_entry");
    let result = sqlx::query(
        r#"
        INSERT INTO audit_logs (user_id, action_type, entity_type, entity_id, old_value, new_value, ip_address)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(entry.user_id)
    .bind(entry.action.as_str())
    .bind(entry.action.entity_type())
    .bind(entry.entity_id)
    .bind(&entry.old_value)
    .bind(&entry.new_value)
    .bind(&entry.ip_address)
    .execute(&mut *conn)
    .await;
    timer.record();
    result.map(|_| ())
}
