//! Patrol scan, anomaly and statistics report models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// Upstream records
// ============================================================================

/// A single checkpoint check-in by an officer, with display fields joined in.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRecord {
    pub scan_id: Uuid,
    pub officer_id: Uuid,
    pub officer_employee_code: Option<String>,
    pub officer_first_name: Option<String>,
    pub officer_last_name: Option<String>,
    /// QR code (gate) that was scanned.
    pub location_id: Uuid,
    pub location_name: Option<String>,
    pub location_description: Option<String>,
    pub scan_timestamp: DateTime<Utc>,
    pub comments: Option<String>,
}

/// A flagged irregularity in patrol coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnomalyRecord {
    pub anomaly_id: Uuid,
    /// Cleared when the officer's record is hard-deleted.
    pub officer_id: Option<Uuid>,
    pub anomaly_type: String,
    pub detection_date: DateTime<Utc>,
    pub status: String,
    pub notes: Option<String>,
}

// ============================================================================
// Period selection
// ============================================================================

/// Named period a report covers. `Custom` means explicit bounds were supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Day,
    Week,
    Month,
    Year,
    All,
    Custom,
}

impl PeriodKind {
    /// Parses a period keyword. Unknown keywords mean "all time".
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "day" => PeriodKind::Day,
            "week" => PeriodKind::Week,
            "month" => PeriodKind::Month,
            "year" => PeriodKind::Year,
            _ => PeriodKind::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::Day => "day",
            PeriodKind::Week => "week",
            PeriodKind::Month => "month",
            PeriodKind::Year => "year",
            PeriodKind::All => "all",
            PeriodKind::Custom => "custom",
        }
    }
}

impl std::fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive time window applied to scans and anomalies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodWindow {
    Unbounded,
    Bounded {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl PeriodWindow {
    pub fn start(&self) -> Option<DateTime<Utc>> {
        match self {
            PeriodWindow::Unbounded => None,
            PeriodWindow::Bounded { start, .. } => Some(*start),
        }
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        match self {
            PeriodWindow::Unbounded => None,
            PeriodWindow::Bounded { end, .. } => Some(*end),
        }
    }

    /// Whether an instant falls inside the window (bounds inclusive).
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        match self {
            PeriodWindow::Unbounded => true,
            PeriodWindow::Bounded { start, end } => *start <= at && at <= *end,
        }
    }

    pub fn as_date_range(&self) -> Option<DateRange> {
        match self {
            PeriodWindow::Unbounded => None,
            PeriodWindow::Bounded { start, end } => Some(DateRange {
                start: *start,
                end: *end,
            }),
        }
    }
}

/// The period actually applied to a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPeriod {
    pub kind: PeriodKind,
    pub window: PeriodWindow,
}

/// Query parameters for the patrol statistics endpoint.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PatrolStatsQuery {
    /// Restrict to a single officer
    #[serde(default)]
    pub officer_id: Option<Uuid>,
    /// Explicit window start (wins over `period` when `end_date` is also set)
    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_date_bound"))]
    pub start_date: Option<String>,
    /// Explicit window end
    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_date_bound"))]
    pub end_date: Option<String>,
    /// day, week, month, year or all (default)
    #[serde(default)]
    pub period: Option<String>,
}

// ============================================================================
// Aggregate report
// ============================================================================

/// Full patrol statistics report. Every field is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AggregateReport {
    pub summary: ReportSummary,
    pub officer_statistics: Vec<OfficerStatistics>,
    pub location_statistics: Vec<LocationStatistics>,
    pub daily_statistics: Vec<DailyStatistics>,
    /// Hour of day (0-23) to scan count. Hours without scans are absent.
    pub hourly_distribution: BTreeMap<u32, i64>,
    pub anomaly_statistics: AnomalyStatistics,
    pub recent_anomalies: Vec<AnomalyRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReportSummary {
    pub total_scans: i64,
    pub unique_officers: i64,
    pub unique_locations: i64,
    pub first_patrol: Option<DateTime<Utc>>,
    pub last_patrol: Option<DateTime<Utc>>,
    pub period: PeriodKind,
    /// Bounds that were applied; `None` for all-time reports.
    pub date_range: Option<DateRange>,
    pub averages: ReportAverages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReportAverages {
    pub scans_per_day: f64,
    pub locations_per_day: f64,
}

/// Per-officer rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OfficerStatistics {
    pub officer_id: Uuid,
    pub employee_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub total_scans: i64,
    pub unique_locations: i64,
    pub first_patrol: DateTime<Utc>,
    pub last_patrol: DateTime<Utc>,
}

/// Per-location (QR code) rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LocationStatistics {
    pub qr_code_id: Uuid,
    pub gate_name: Option<String>,
    pub location_description: Option<String>,
    pub total_scans: i64,
    pub unique_officers: i64,
    pub first_patrol: DateTime<Utc>,
    pub last_patrol: DateTime<Utc>,
}

/// Per-calendar-day rollup in the report timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DailyStatistics {
    pub date: NaiveDate,
    pub total_scans: i64,
    pub unique_officers: i64,
    pub unique_locations: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnomalyStatistics {
    pub total: i64,
    pub by_type: BTreeMap<String, i64>,
    pub by_status: BTreeMap<String, i64>,
}
