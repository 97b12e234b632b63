//! Domain models for the patrol admin backend.

pub mod administrator;
pub mod audit;
pub mod house;
pub mod notification;
pub mod officer;
pub mod patrol;

pub use administrator::{AdministratorRecord, AdministratorResponse, CreateAdministratorRequest, NewAdministrator};
pub use audit::{AuditAction, NewAuditEntry};
pub use house::{
    HouseDetail, HousePatrol, HouseStatus, HouseSummary, PaymentRecord, RemoveHouseRequest,
};
pub use notification::{Notice, NotificationAudience, NotificationChannel};
pub use officer::{
    ChangeOfficerStatusRequest, OfficerDetail, OfficerPatrolSummary, OfficerStatusAction,
    OfficerSummary, RecentPatrol, SuspensionWindow, UserStatus,
};
pub use patrol::{
    AggregateReport, AnomalyRecord, AnomalyStatistics, DailyStatistics, DateRange,
    LocationStatistics, OfficerStatistics, PatrolStatsQuery, PeriodKind, PeriodWindow,
    ReportAverages, ReportSummary, ResolvedPeriod, ScanRecord,
};
