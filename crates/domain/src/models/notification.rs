//! Notification models written alongside back-office actions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delivery channel stored in `notifications.notification_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    Email,
    Push,
}

impl NotificationChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationChannel::Email => "email",
            NotificationChannel::Push => "push",
        }
    }
}

/// Who receives a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAudience {
    /// Every member holding an active subscription.
    ActiveSubscribers,
    /// Every active, non-deleted security officer.
    ActiveOfficers,
    /// A single member.
    Member(Uuid),
}

/// A notice to fan out into `notifications` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub audience: NotificationAudience,
    pub channel: NotificationChannel,
    pub subject: String,
    pub message: String,
    pub related_entity_type: &'static str,
    pub related_entity_id: Uuid,
}
