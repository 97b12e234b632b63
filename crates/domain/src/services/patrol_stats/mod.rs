//! Patrol statistics engine.
//!
//! Resolves the report window, fetches scans and anomalies concurrently from
//! their sources, and reduces them into an [`AggregateReport`]. Nothing is
//! cached; every call recomputes from the sources.

mod anomalies;
mod error;
mod period;
mod scans;

pub use anomalies::{anomaly_statistics, recent_anomalies, RECENT_ANOMALY_LIMIT};
pub use error::StatsError;
pub use period::resolve_period;
pub use scans::{
    daily_statistics, hourly_distribution, location_statistics, officer_statistics,
    summarize_scans, ScanRollups, EMPTY_WINDOW_DAY_DENOMINATOR,
};

use chrono::{FixedOffset, Offset, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use super::clock::Clock;
use crate::models::{
    AggregateReport, AnomalyRecord, PatrolStatsQuery, PeriodWindow, ReportSummary,
    ResolvedPeriod, ScanRecord,
};

const SCAN_SOURCE: &str = "patrol scans";
const ANOMALY_SOURCE: &str = "patrol anomalies";

/// Upstream of patrol scans.
#[async_trait::async_trait]
pub trait ScanSource: Send + Sync {
    /// Scans inside `window` (inclusive), optionally for one officer, newest first.
    async fn query_scans(
        &self,
        officer_id: Option<Uuid>,
        window: &PeriodWindow,
    ) -> Result<Vec<ScanRecord>, StatsError>;
}

/// Upstream of patrol anomalies.
#[async_trait::async_trait]
pub trait AnomalySource: Send + Sync {
    /// Anomalies detected inside `window` (inclusive), optionally for one officer, newest first.
    async fn query_anomalies(
        &self,
        officer_id: Option<Uuid>,
        window: &PeriodWindow,
    ) -> Result<Vec<AnomalyRecord>, StatsError>;
}

/// Report timezone and upstream deadline.
#[derive(Debug, Clone, Copy)]
pub struct StatisticsSettings {
    pub utc_offset: FixedOffset,
    pub fetch_timeout: Duration,
}

impl Default for StatisticsSettings {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

/// Computes patrol statistics reports from a scan and an anomaly source.
pub struct PatrolStatisticsService<S, A> {
    scans: S,
    anomalies: A,
    clock: Arc<dyn Clock>,
    settings: StatisticsSettings,
}

impl<S, A> PatrolStatisticsService<S, A>
where
    S: ScanSource,
    A: AnomalySource,
{
    pub fn new(scans: S, anomalies: A, clock: Arc<dyn Clock>, settings: StatisticsSettings) -> Self {
        Self {
            scans,
            anomalies,
            clock,
            settings,
        }
    }

    /// Builds the report for `query`.
    ///
    /// Both sources are queried concurrently, each under the fetch timeout.
    /// Any failure aborts the whole report.
    pub async fn get_patrol_statistics(
        &self,
        query: &PatrolStatsQuery,
    ) -> Result<AggregateReport, StatsError> {
        let period = resolve_period(
            query.start_date.as_deref(),
            query.end_date.as_deref(),
            query.period.as_deref(),
            self.clock.now(),
            self.settings.utc_offset,
        )?;

        let (scans, anomalies) = tokio::try_join!(
            fetch_with_timeout(
                SCAN_SOURCE,
                self.settings.fetch_timeout,
                self.scans.query_scans(query.officer_id, &period.window),
            ),
            fetch_with_timeout(
                ANOMALY_SOURCE,
                self.settings.fetch_timeout,
                self.anomalies.query_anomalies(query.officer_id, &period.window),
            ),
        )?;

        debug!(
            period = %period.kind,
            officer_id = ?query.officer_id,
            scans = scans.len(),
            anomalies = anomalies.len(),
            "Fetched patrol statistics inputs"
        );

        Ok(assemble_report(&period, &scans, &anomalies, self.settings.utc_offset))
    }
}

async fn fetch_with_timeout<T, F>(
    source_name: &'static str,
    limit: Duration,
    fetch: F,
) -> Result<T, StatsError>
where
    F: Future<Output = Result<T, StatsError>>,
{
    match tokio::time::timeout(limit, fetch).await {
        Ok(result) => result,
        Err(_) => Err(StatsError::UpstreamTimeout(source_name)),
    }
}

/// Reduces fetched scans and anomalies into a report for `period`.
pub fn assemble_report(
    period: &ResolvedPeriod,
    scans: &[ScanRecord],
    anomalies: &[AnomalyRecord],
    offset: FixedOffset,
) -> AggregateReport {
    let rollups = summarize_scans(scans, offset);

    AggregateReport {
        summary: ReportSummary {
            total_scans: rollups.total_scans,
            unique_officers: rollups.unique_officers,
            unique_locations: rollups.unique_locations,
            first_patrol: rollups.first_patrol,
            last_patrol: rollups.last_patrol,
            period: period.kind,
            date_range: period.window.as_date_range(),
            averages: rollups.averages,
        },
        officer_statistics: rollups.officer_statistics,
        location_statistics: rollups.location_statistics,
        daily_statistics: rollups.daily_statistics,
        hourly_distribution: rollups.hourly_distribution,
        anomaly_statistics: anomaly_statistics(anomalies),
        recent_anomalies: recent_anomalies(anomalies),
    }
}
