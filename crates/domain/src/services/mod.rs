//! Domain services for the patrol admin backend.
//!
//! Services contain business logic that operates on domain models.

pub mod clock;
pub mod notices;
pub mod officer_status;
pub mod patrol_stats;

pub use clock::{Clock, FixedClock, SystemClock};
pub use officer_status::{plan_status_change, OfficerStatusChange, StatusChangeError};
pub use patrol_stats::{
    AnomalySource, PatrolStatisticsService, ScanSource, StatisticsSettings, StatsError,
};
