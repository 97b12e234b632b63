//! Group-by rollups over patrol scans.

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;
use uuid::Uuid;

use crate::models::{
    DailyStatistics, LocationStatistics, OfficerStatistics, ReportAverages, ScanRecord,
};

/// Day count used for averages when no scan falls in the window.
pub const EMPTY_WINDOW_DAY_DENOMINATOR: f64 = 1.0;

/// Everything derived from the scan set alone.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRollups {
    pub total_scans: i64,
    pub unique_officers: i64,
    pub unique_locations: i64,
    pub first_patrol: Option<DateTime<Utc>>,
    pub last_patrol: Option<DateTime<Utc>>,
    pub averages: ReportAverages,
    pub officer_statistics: Vec<OfficerStatistics>,
    pub location_statistics: Vec<LocationStatistics>,
    pub daily_statistics: Vec<DailyStatistics>,
    pub hourly_distribution: BTreeMap<u32, i64>,
}

/// Computes every scan rollup. Calendar days and hours use `offset`.
pub fn summarize_scans(scans: &[ScanRecord], offset: FixedOffset) -> ScanRollups {
    let unique_officers = scans.iter().map(|s| s.officer_id).collect::<HashSet<_>>().len();
    let unique_locations = scans.iter().map(|s| s.location_id).collect::<HashSet<_>>().len();
    let daily_statistics = daily_statistics(scans, offset);

    ScanRollups {
        total_scans: scans.len() as i64,
        unique_officers: unique_officers as i64,
        unique_locations: unique_locations as i64,
        first_patrol: scans.iter().map(|s| s.scan_timestamp).min(),
        last_patrol: scans.iter().map(|s| s.scan_timestamp).max(),
        averages: averages(scans.len() as i64, &daily_statistics),
        officer_statistics: officer_statistics(scans),
        location_statistics: location_statistics(scans),
        daily_statistics,
        hourly_distribution: hourly_distribution(scans, offset),
    }
}

/// Per-officer rollup, busiest first. Ties keep first-seen order.
pub fn officer_statistics(scans: &[ScanRecord]) -> Vec<OfficerStatistics> {
    let mut stats: Vec<OfficerStatistics> = group_by(scans, |s| s.officer_id)
        .into_iter()
        .filter_map(|group| {
            let sample = *group.first()?;
            let (first_patrol, last_patrol) = time_span(&group)?;
            Some(OfficerStatistics {
                officer_id: sample.officer_id,
                employee_id: sample.officer_employee_code.clone(),
                first_name: sample.officer_first_name.clone(),
                last_name: sample.officer_last_name.clone(),
                total_scans: group.len() as i64,
                unique_locations: distinct(&group, |s| s.location_id),
                first_patrol,
                last_patrol,
            })
        })
        .collect();

    stats.sort_by(|a, b| b.total_scans.cmp(&a.total_scans));
    stats
}

/// Per-location rollup, busiest first. Ties keep first-seen order.
pub fn location_statistics(scans: &[ScanRecord]) -> Vec<LocationStatistics> {
    let mut stats: Vec<LocationStatistics> = group_by(scans, |s| s.location_id)
        .into_iter()
        .filter_map(|group| {
            let sample = *group.first()?;
            let (first_patrol, last_patrol) = time_span(&group)?;
            Some(LocationStatistics {
                qr_code_id: sample.location_id,
                gate_name: sample.location_name.clone(),
                location_description: sample.location_description.clone(),
                total_scans: group.len() as i64,
                unique_officers: distinct(&group, |s| s.officer_id),
                first_patrol,
                last_patrol,
            })
        })
        .collect();

    stats.sort_by(|a, b| b.total_scans.cmp(&a.total_scans));
    stats
}

#[derive(Default)]
struct DayBucket {
    total: i64,
    officers: HashSet<Uuid>,
    locations: HashSet<Uuid>,
}

/// Per-day rollup in ascending date order.
pub fn daily_statistics(scans: &[ScanRecord], offset: FixedOffset) -> Vec<DailyStatistics> {
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    for scan in scans {
        let day = scan.scan_timestamp.with_timezone(&offset).date_naive();
        let bucket = buckets.entry(day).or_default();
        bucket.total += 1;
        bucket.officers.insert(scan.officer_id);
        bucket.locations.insert(scan.location_id);
    }

    buckets
        .into_iter()
        .map(|(date, bucket)| DailyStatistics {
            date,
            total_scans: bucket.total,
            unique_officers: bucket.officers.len() as i64,
            unique_locations: bucket.locations.len() as i64,
        })
        .collect()
}

/// Scan count per local hour of day. Hours without scans are absent.
pub fn hourly_distribution(scans: &[ScanRecord], offset: FixedOffset) -> BTreeMap<u32, i64> {
    let mut hours = BTreeMap::new();
    for scan in scans {
        *hours
            .entry(scan.scan_timestamp.with_timezone(&offset).hour())
            .or_insert(0) += 1;
    }
    hours
}

fn averages(total_scans: i64, days: &[DailyStatistics]) -> ReportAverages {
    let denominator = if days.is_empty() {
        EMPTY_WINDOW_DAY_DENOMINATOR
    } else {
        days.len() as f64
    };
    let location_days: i64 = days.iter().map(|d| d.unique_locations).sum();

    ReportAverages {
        scans_per_day: total_scans as f64 / denominator,
        locations_per_day: location_days as f64 / denominator,
    }
}

fn group_by<K, F>(scans: &[ScanRecord], key: F) -> Vec<Vec<&ScanRecord>>
where
    K: Eq + Hash,
    F: Fn(&ScanRecord) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Vec<&ScanRecord>> = Vec::new();
    for scan in scans {
        let slot = *index.entry(key(scan)).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(scan);
    }
    groups
}

fn distinct<F>(group: &[&ScanRecord], key: F) -> i64
where
    F: Fn(&ScanRecord) -> Uuid,
{
    group.iter().map(|s| key(*s)).collect::<HashSet<_>>().len() as i64
}

fn time_span(group: &[&ScanRecord]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let first = group.iter().map(|s| s.scan_timestamp).min()?;
    let last = group.iter().map(|s| s.scan_timestamp).max()?;
    Some((first, last))
}
