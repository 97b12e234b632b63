//! Officer suspension and reactivation rules.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::models::{ChangeOfficerStatusRequest, OfficerStatusAction, SuspensionWindow};

/// Longest suspension the back-office may impose.
pub const MAX_SUSPENSION_DAYS: i64 = 3650;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatusChangeError {
    #[error("Suspension reason is required")]
    MissingReason,

    #[error("Suspension duration must be between 1 and {max} days, got {0}", max = MAX_SUSPENSION_DAYS)]
    InvalidDuration(i64),
}

/// A validated status change, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfficerStatusChange {
    Suspend {
        reason: String,
        window: SuspensionWindow,
    },
    Activate,
}

/// Turns a parsed action and its request body into a concrete change.
///
/// Suspensions need a non-blank reason; the duration falls back to
/// `default_days` and starts at `now`.
pub fn plan_status_change(
    action: OfficerStatusAction,
    request: &ChangeOfficerStatusRequest,
    default_days: i64,
    now: DateTime<Utc>,
) -> Result<OfficerStatusChange, StatusChangeError> {
    match action {
        OfficerStatusAction::Activate => Ok(OfficerStatusChange::Activate),
        OfficerStatusAction::Suspend => {
            let reason = request
                .suspension_reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .ok_or(StatusChangeError::MissingReason)?;

            let days = request.suspension_duration_days.unwrap_or(default_days);
            if !(1..=MAX_SUSPENSION_DAYS).contains(&days) {
                return Err(StatusChangeError::InvalidDuration(days));
            }

            Ok(OfficerStatusChange::Suspend {
                reason: reason.to_string(),
                window: suspension_window(now, days),
            })
        }
    }
}

/// Suspension starting at `now` and lasting `days` calendar days.
pub fn suspension_window(now: DateTime<Utc>, days: i64) -> SuspensionWindow {
    SuspensionWindow {
        start: now,
        end: now + Duration::days(days),
    }
}
