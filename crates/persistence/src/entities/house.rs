//! House, payment and house-patrol entities (database row mappings).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{HouseDetail, HousePatrol, HouseSummary, PaymentRecord};
use sqlx::FromRow;
use uuid::Uuid;

/// House list row. Money columns are read as `float8`.
#[derive(Debug, Clone, FromRow)]
pub struct HouseSummaryEntity {
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

impl From<HouseSummaryEntity> for HouseSummary {
    fn from(entity: HouseSummaryEntity) -> Self {
        Self {
            house_id: entity.house_id,
            house_number: entity.house_number,
            street_address: entity.street_address,
            status: entity.status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            qr_code_value: entity.qr_code_value,
            gate_name: entity.gate_name,
            qr_active: entity.qr_active,
            member_first_name: entity.member_first_name,
            member_last_name: entity.member_last_name,
            member_email: entity.member_email,
            member_phone: entity.member_phone,
            subscription_status: entity.subscription_status,
            missed_payments_count: entity.missed_payments_count,
        }
    }
}

/// House detail row, without patrol and payment history.
#[derive(Debug, Clone, FromRow)]
pub struct HouseDetailEntity {
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
    pub member_subscription_status: Option<String>,
    pub subscription_start_date: Option<NaiveDate>,
    pub last_payment_date: Option<NaiveDate>,
    pub monthly_fee: Option<f64>,
    pub missed_payments_count: Option<i32>,
    pub subscription_status: Option<String>,
}

impl HouseDetailEntity {
    /// Completes the detail view with the gate's patrols and the member's payments.
    pub fn into_detail(
        self,
        patrol_history: Vec<HousePatrol>,
        payment_history: Vec<PaymentRecord>,
    ) -> HouseDetail {
        HouseDetail {
            house_id: self.house_id,
            house_number: self.house_number,
            street_address: self.street_address,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            qr_code_id: self.qr_code_id,
            qr_code_value: self.qr_code_value,
            gate_name: self.gate_name,
            location_description: self.location_description,
            qr_active: self.qr_active,
            member_id: self.member_id,
            member_first_name: self.member_first_name,
            member_last_name: self.member_last_name,
            member_email: self.member_email,
            member_phone: self.member_phone,
            member_subscription_status: self.member_subscription_status,
            subscription_start_date: self.subscription_start_date,
            last_payment_date: self.last_payment_date,
            monthly_fee: self.monthly_fee,
            missed_payments_count: self.missed_payments_count,
            subscription_status: self.subscription_status,
            patrol_history,
            payment_history,
        }
    }
}

/// House address, status and member, as needed by status changes.
#[derive(Debug, Clone, FromRow)]
pub struct HouseContactEntity {
    pub house_id: Uuid,
    pub house_number: String,
    pub street_address: String,
    pub status: String,
    pub member_id: Option<Uuid>,
}

#[derive(Debug, Clone, FromRow)]
pub struct HousePatrolEntity {
    pub scan_id: Uuid,
    pub scan_timestamp: DateTime<Utc>,
    pub comments: Option<String>,
    pub officer_first_name: Option<String>,
    pub officer_last_name: Option<String>,
    pub employee_id: Option<String>,
}

impl From<HousePatrolEntity> for HousePatrol {
    fn from(entity: HousePatrolEntity) -> Self {
        Self {
            scan_id: entity.scan_id,
            scan_timestamp: entity.scan_timestamp,
            comments: entity.comments,
            officer_first_name: entity.officer_first_name,
            officer_last_name: entity.officer_last_name,
            employee_id: entity.employee_id,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct PaymentEntity {
    pub payment_id: Uuid,
    pub amount: f64,
    pub payment_method: Option<String>,
    pub payment_status: String,
    pub payment_date: DateTime<Utc>,
    pub month_paid_for: Option<NaiveDate>,
}

impl From<PaymentEntity> for PaymentRecord {
    fn from(entity: PaymentEntity) -> Self {
        Self {
            payment_id: entity.payment_id,
            amount: entity.amount,
            payment_method: entity.payment_method,
            payment_status: entity.payment_status,
            payment_date: entity.payment_date,
            month_paid_for: entity.month_paid_for,
        }
    }
}
