use std::collections::BTreeMap;

use crate::models::{AnomalyRecord, AnomalyStatistics};

/// How many anomalies the report lists individually.
pub const RECENT_ANOMALY_LIMIT: usize = 10;

/// Counts anomalies by type and by status.
pub fn anomaly_statistics(anomalies: &[AnomalyRecord]) -> AnomalyStatistics {
    let mut by_type = BTreeMap::new();
    let mut by_status = BTreeMap::new();
    for anomaly in anomalies {
        *by_type.entry(anomaly.anomaly_type.clone()).or_insert(0) += 1;
        *by_status.entry(anomaly.status.clone()).or_insert(0) += 1;
    }

    AnomalyStatistics {
        total: anomalies.len() as i64,
        by_type,
        by_status,
    }
}

/// Most recently detected anomalies, newest first.
///
/// Sorts a copy even though sources already return newest first.
pub fn recent_anomalies(anomalies: &[AnomalyRecord]) -> Vec<AnomalyRecord> {
    let mut sorted = anomalies.to_vec();
    sorted.sort_by(|a, b| b.detection_date.cmp(&a.detection_date));
    sorted.truncate(RECENT_ANOMALY_LIMIT);
    sorted
}
