//! House and subscription domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Monitoring status of a house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HouseStatus {
    Active,
    Suspended,
    Deleted,
}

impl HouseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HouseStatus::Active => "active",
            HouseStatus::Suspended => "suspended",
            HouseStatus::Deleted => "deleted",
        }
    }
}

impl FromStr for HouseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(HouseStatus::Active),
            "suspended" => Ok(HouseStatus::Suspended),
            "deleted" => Ok(HouseStatus::Deleted),
            _ => Err(format!("Unknown house status: {}", s)),
        }
    }
}

impl std::fmt::Display for HouseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// House row in the back-office list, with QR code and member summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseSummary {
    pub house_id: Uuid,
    pub house_number: String,
    pub street_address: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub qr_code_value: Option<String>,
    pub gate_name: Option<String>,
    pub qr_active: Option<bool>,
    pub member_first_name: Option<String>,
    pub member_last_name: Option<String>,
    pub member_email: Option<String>,
    pub member_phone: Option<String>,
    pub subscription_status: Option<String>,
    pub missed_payments_count: Option<i32>,
}

/// A scan of the house's QR code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousePatrol {
    pub scan_id: Uuid,
    pub scan_timestamp: DateTime<Utc>,
    pub comments: Option<String>,
    pub officer_first_name: Option<String>,
    pub officer_last_name: Option<String>,
    pub employee_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub payment_id: Uuid,
    pub amount: f64,
    pub payment_method: Option<String>,
    pub payment_status: String,
    pub payment_date: DateTime<Utc>,
    pub month_paid_for: Option<NaiveDate>,
}

/// House detail page payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseDetail {
    pub house_id: Uuid,
    pub house_number: String,
    pub street_address: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub qr_code_id: Option<Uuid>,
    pub qr_code_value: Option<String>,
    pub gate_name: Option<String>,
    pub location_description: Option<String>,
    pub qr_active: Option<bool>,
    pub member_id: Option<Uuid>,
    pub member_first_name: Option<String>,
    pub member_last_name: Option<String>,
    pub member_email: Option<String>,
    pub member_phone: Option<String>,
    /// Status kept on the member record.
    pub member_subscription_status: Option<String>,
    pub subscription_start_date: Option<NaiveDate>,
    pub last_payment_date: Option<NaiveDate>,
    pub monthly_fee: Option<f64>,
    pub missed_payments_count: Option<i32>,
    /// Status of the member's current (non-cancelled) subscription.
    pub subscription_status: Option<String>,
    pub patrol_history: Vec<HousePatrol>,
    pub payment_history: Vec<PaymentRecord>,
}

/// Optional body for `DELETE /api/admin/houses/:id`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RemoveHouseRequest {
    #[serde(default)]
    #[validate(length(max = 1000, message = "Reason must be at most 1000 characters"))]
    pub reason: Option<String>,
}

impl RemoveHouseRequest {
    /// The supplied reason, ignoring blank strings.
    pub fn reason(&self) -> Option<&str> {
        self.reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_house_status_roundtrip_strings() {
        for status in [HouseStatus::Active, HouseStatus::Suspended, HouseStatus::Deleted] {
            assert_eq!(status.as_str().parse::<HouseStatus>(), Ok(status));
        }
        assert!("archived".parse::<HouseStatus>().is_err());
    }

    #[test]
    fn test_blank_reason_is_ignored() {
        let request = RemoveHouseRequest {
            reason: Some("   ".to_string()),
        };
        assert_eq!(request.reason(), None);

        let request = RemoveHouseRequest {
            reason: Some(" Three months unpaid ".to_string()),
        };
        assert_eq!(request.reason(), Some("Three months unpaid"));
    }

    #[test]
    fn test_empty_body_deserializes() {
        let request: RemoveHouseRequest = serde_json::from_str("{}").unwrap();
        assert!(request.reason.is_none());
    }
}
