//! Texts of the notices sent when officers or houses change status.

use uuid::Uuid;

use crate::models::{Notice, NotificationAudience, NotificationChannel};

const OFFICER_ENTITY: &str = "security_officer";
const HOUSE_ENTITY: &str = "house";

fn officer_notice(officer_id: Uuid, subject: &str, message: String) -> Notice {
    Notice {
        audience: NotificationAudience::ActiveSubscribers,
        channel: NotificationChannel::Email,
        subject: subject.to_string(),
        message,
        related_entity_type: OFFICER_ENTITY,
        related_entity_id: officer_id,
    }
}

pub fn officer_suspended(officer_id: Uuid, first_name: &str, last_name: &str, reason: &str) -> Notice {
    officer_notice(
        officer_id,
        "Security Officer Suspended",
        format!(
            "Security officer {} {} has been suspended. Reason: {}",
            first_name, last_name, reason
        ),
    )
}

pub fn officer_reactivated(officer_id: Uuid, first_name: &str, last_name: &str) -> Notice {
    officer_notice(
        officer_id,
        "Security Officer Reactivated",
        format!(
            "Security officer {} {} has been reactivated and is back on duty.",
            first_name, last_name
        ),
    )
}

pub fn officer_removed(officer_id: Uuid, first_name: &str, last_name: &str) -> Notice {
    officer_notice(
        officer_id,
        "Security Officer Removed",
        format!(
            "Security officer {} {} has been permanently removed from the system.",
            first_name, last_name
        ),
    )
}

/// Address line used in house notices.
pub struct HouseAddress<'a> {
    pub house_id: Uuid,
    pub house_number: &'a str,
    pub street_address: &'a str,
}

/// Email to the house's member. A custom `reason` replaces the default text.
pub fn house_removed_for_member(member_id: Uuid, house: &HouseAddress<'_>, reason: Option<&str>) -> Notice {
    let message = match reason {
        Some(reason) => reason.to_string(),
        None => format!(
            "Your house at {} {} has been removed from security monitoring due to missed payments. Please contact administration.",
            house.house_number, house.street_address
        ),
    };
    Notice {
        audience: NotificationAudience::Member(member_id),
        channel: NotificationChannel::Email,
        subject: "House Removed from Monitoring".to_string(),
        message,
        related_entity_type: HOUSE_ENTITY,
        related_entity_id: house.house_id,
    }
}

/// Push notice to every active officer.
pub fn house_removed_for_officers(house: &HouseAddress<'_>) -> Notice {
    Notice {
        audience: NotificationAudience::ActiveOfficers,
        channel: NotificationChannel::Push,
        subject: "House Removed from Patrol".to_string(),
        message: format!(
            "House at {} {} has been removed from patrol monitoring.",
            house.house_number, house.street_address
        ),
        related_entity_type: HOUSE_ENTITY,
        related_entity_id: house.house_id,
    }
}

pub fn house_reinstated_for_member(member_id: Uuid, house: &HouseAddress<'_>) -> Notice {
    Notice {
        audience: NotificationAudience::Member(member_id),
        channel: NotificationChannel::Email,
        subject: "House Reinstated for Monitoring".to_string(),
        message: format!(
            "Good news! Your house at {} {} has been reinstated for security monitoring. Patrols will resume immediately.",
            house.house_number, house.street_address
        ),
        related_entity_type: HOUSE_ENTITY,
        related_entity_id: house.house_id,
    }
}

pub fn house_reinstated_for_officers(house: &HouseAddress<'_>) -> Notice {
    Notice {
        audience: NotificationAudience::ActiveOfficers,
        channel: NotificationChannel::Push,
        subject: "House Added Back to Patrol".to_string(),
        message: format!(
            "House at {} {} has been reinstated for patrol monitoring.",
            house.house_number, house.street_address
        ),
        related_entity_type: HOUSE_ENTITY,
        related_entity_id: house.house_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(id: Uuid) -> HouseAddress<'static> {
        HouseAddress {
            house_id: id,
            house_number: "14B",
            street_address: "Acacia Avenue",
        }
    }

    #[test]
    fn test_officer_suspended_text() {
        let id = Uuid::new_v4();
        let notice = officer_suspended(id, "Juma", "Mwangi", "Missed three rounds");
        assert_eq!(notice.audience, NotificationAudience::ActiveSubscribers);
        assert_eq!(notice.channel, NotificationChannel::Email);
        assert_eq!(
            notice.message,
            "Security officer Juma Mwangi has been suspended. Reason: Missed three rounds"
        );
        assert_eq!(notice.related_entity_type, "security_officer");
        assert_eq!(notice.related_entity_id, id);
    }

    #[test]
    fn test_house_removed_default_and_custom_reason() {
        let house = Uuid::new_v4();
        let member = Uuid::new_v4();

        let default = house_removed_for_member(member, &address(house), None);
        assert_eq!(
            default.message,
            "Your house at 14B Acacia Avenue has been removed from security monitoring due to missed payments. Please contact administration."
        );
        assert_eq!(default.audience, NotificationAudience::Member(member));

        let custom = house_removed_for_member(member, &address(house), Some("Gate access revoked"));
        assert_eq!(custom.message, "Gate access revoked");
    }

    #[test]
    fn test_officer_house_notices_are_push() {
        let house = address(Uuid::new_v4());
        for notice in [house_removed_for_officers(&house), house_reinstated_for_officers(&house)] {
            assert_eq!(notice.channel, NotificationChannel::Push);
            assert_eq!(notice.audience, NotificationAudience::ActiveOfficers);
            assert_eq!(notice.related_entity_type, "house");
        }
    }
}
