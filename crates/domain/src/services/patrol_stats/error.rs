use thiserror::Error;

/// Failures of a patrol statistics request. None of them yield a partial report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// Malformed or inverted date bounds.
    #[error("Invalid date range: {0}")]
    Validation(String),

    /// An upstream read failed.
    #[error("Failed to fetch {source_name}: {message}")]
    UpstreamFetch {
        source_name: &'static str,
        message: String,
    },

    /// An upstream read exceeded the fetch timeout.
    #[error("Timed out fetching {0}")]
    UpstreamTimeout(&'static str),

    /// A record arrived without officer, location or timestamp.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

impl StatsError {
    pub fn fetch(source_name: &'static str, err: impl std::fmt::Display) -> Self {
        StatsError::UpstreamFetch {
            source_name,
            message: err.to_string(),
        }
    }
}
