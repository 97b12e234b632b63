//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod administrator;
pub mod api_key;
pub mod house;
pub mod officer;
pub mod patrol;

pub use administrator::{AdministratorEntity, CreatedAdministratorEntity};
pub use api_key::ApiKeyEntity;
pub use house::{HouseContactEntity, HouseDetailEntity, HousePatrolEntity, HouseSummaryEntity, PaymentEntity};
pub use officer::{OfficerDetailEntity, OfficerEntity, OfficerNameEntity, OfficerPatrolSummaryEntity, RecentPatrolEntity};
pub use patrol::{PatrolAnomalyEntity, PatrolScanEntity};
