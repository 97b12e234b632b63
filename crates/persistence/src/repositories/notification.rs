//! Notification fan-out written inside back-office transactions.

use domain::models::{Notice, NotificationAudience};
use sqlx::PgConnection;

use crate::metrics::QueryTimer;

const TO_ACTIVE_SUBSCRIBERS: &str = r#"
    INSERT INTO notifications (user_id, notification_type, subject, message, related_entity_type, related_entity_id)
    SELECT DISTINCT nm.member_id, $1, $2, $3, $4, $5
    FROM neighborhood_members nm
    JOIN subscriptions s ON nm.member_id = s.member_id
    WHERE s.status = 'active'
"#;

const TO_ACTIVE_OFFICERS: &str = r#"
    INSERT INTO notifications (user_id, notification_type, subject, message, related_entity_type, related_entity_id)
    SELECT so.officer_id, $1, $2, $3, $4, $5
    FROM security_officers so
    JOIN users u ON so.officer_id = u.user_id
    WHERE u.status = 'active' AND so.is_permanently_deleted = false
"#;

const TO_MEMBER: &str = r#"
    INSERT INTO notifications (user_id, notification_type, subject, message, related_entity_type, related_entity_id)
    VALUES ($6, $1, $2, $3, $4, $5)
"#;

/// Inserts one `notifications` row per recipient of `notice`.
///
/// Returns the number of rows written.
pub async fn insert_notice(conn: &mut PgConnection, notice: &Notice) -> Result<u64, sqlx::Error> {
    let timer = QueryTimer::new("insert_notice");

    let sql = match notice.audience {
        NotificationAudience::ActiveSubscribers => TO_ACTIVE_SUBSCRIBERS,
        NotificationAudience::ActiveOfficers => TO_ACTIVE_OFFICERS,
        NotificationAudience::Member(_) => TO_MEMBER,
    };

    let mut query = sqlx::query(sql)
        .bind(notice.channel.as_str())
        .bind(&notice.subject)
        .bind(&notice.message)
        .bind(notice.related_entity_type)
        .bind(notice.related_entity_id);
    if let NotificationAudience::Member(member_id) = notice.audience {
        query = query.bind(member_id);
    }

    let result = query.execute(&mut *conn).await;
    timer.record();
    result.map(|r| r.rows_affected())
}
