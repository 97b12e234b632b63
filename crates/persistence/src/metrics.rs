//! Database metrics.
//!
//! Every repository query is wrapped in a [`QueryTimer`]; pool gauges are
//! refreshed when the metrics endpoint is scraped.

use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

pub fn record_query_duration(query_name: &str, duration_secs: f64) {
    histogram!(
        "database_query_duration_seconds",
        "query" => query_name.to_string()
    )
    .record(duration_secs);
}

/// Snapshot of pool occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolUsage {
    pub total: u32,
    pub idle: u32,
    pub active: u32,
}

impl PoolUsage {
    pub fn new(total: u32, idle: usize) -> Self {
        let idle = u32::try_from(idle).unwrap_or(u32::MAX).min(total);
        Self {
            total,
            idle,
            active: total - idle,
        }
    }
}

/// Publishes the pool gauges.
pub fn record_pool_metrics(pool: &PgPool) -> PoolUsage {
    let usage = PoolUsage::new(pool.size(), pool.num_idle());

    gauge!("database_connections_active").set(f64::from(usage.active));
    gauge!("database_connections_idle").set(f64::from(usage.idle));
    gauge!("database_connections_total").set(f64::from(usage.total));

    usage
}

/// Times one query and records it under `query_name`.
///
/// ```ignore
/// let timer = QueryTimer::new("find_officer_detail");
/// let result = sqlx::query_as::<_, OfficerDetailEntity>(...).fetch_optional(&pool).await;
/// timer.record();
/// result
/// ```
pub struct QueryTimer {
    query_name: String,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: impl Into<String>) -> Self {
        Self {
            query_name: query_name.into(),
            start: Instant::now(),
        }
    }

    pub fn record(self) {
        let duration = self.start.elapsed().as_secs_f64();
        record_query_duration(&self.query_name, duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_timer_keeps_name() {
        let timer = QueryTimer::new("list_officers");
        assert_eq!(timer.query_name, "list_officers");

        let timer = QueryTimer::new(String::from("find_house_detail"));
        assert_eq!(timer.query_name, "find_house_detail");
    }

    #[test]
    fn test_record_without_recorder_is_noop() {
        QueryTimer::new("insert_notice").record();
    }

    #[test]
    fn test_pool_usage_splits_active_and_idle() {
        let usage = PoolUsage::new(10, 4);
        assert_eq!(usage, PoolUsage { total: 10, idle: 4, active: 6 });
    }

    #[test]
    fn test_pool_usage_idle_never_exceeds_total() {
        let usage = PoolUsage::new(3, 7);
        assert_eq!(usage.idle, 3);
        assert_eq!(usage.active, 0);
    }
}
