//! Resolution of caller-supplied bounds and period keywords into a window.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use shared::validation::{parse_date_bound, DateBound};

use super::StatsError;
use crate::models::{PeriodKind, PeriodWindow, ResolvedPeriod};

/// Resolves the report window.
///
/// Explicit `start_date` and `end_date` win over `period` when both are
/// present. A bare date as `end_date` covers that whole local day. Keyword
/// windows are anchored on `now` in the report timezone (`offset`).
pub fn resolve_period(
    start_date: Option<&str>,
    end_date: Option<&str>,
    period: Option<&str>,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> Result<ResolvedPeriod, StatsError> {
    let start = start_date.map(|s| parse_bound("start_date", s)).transpose()?;
    let end = end_date.map(|s| parse_bound("end_date", s)).transpose()?;

    if let (Some(start), Some(end)) = (start, end) {
        let start = lower_instant(start, offset).ok_or_else(|| out_of_range("start_date"))?;
        let end = upper_instant(end, offset).ok_or_else(|| out_of_range("end_date"))?;
        if start > end {
            return Err(StatsError::Validation(
                "start_date must not be after end_date".to_string(),
            ));
        }
        return Ok(ResolvedPeriod {
            kind: PeriodKind::Custom,
            window: PeriodWindow::Bounded { start, end },
        });
    }

    let kind = period.map(PeriodKind::from_keyword).unwrap_or(PeriodKind::All);
    let window = keyword_window(kind, now, offset)
        .ok_or_else(|| StatsError::Validation(format!("'{}' window is out of range", kind.as_str())))?;
    Ok(ResolvedPeriod { kind, window })
}

fn parse_bound(field: &str, value: &str) -> Result<DateBound, StatsError> {
    parse_date_bound(value).ok_or_else(|| {
        StatsError::Validation(format!(
            "{} must be YYYY-MM-DD or an RFC 3339 date-time, got '{}'",
            field, value
        ))
    })
}

fn out_of_range(field: &str) -> StatsError {
    StatsError::Validation(format!("{} is outside the supported date range", field))
}

fn keyword_window(kind: PeriodKind, now: DateTime<Utc>, offset: FixedOffset) -> Option<PeriodWindow> {
    let today = now.with_timezone(&offset).date_naive();

    let start_day = match kind {
        PeriodKind::Day => {
            let start = local_midnight(today, offset)?;
            return Some(PeriodWindow::Bounded {
                start,
                end: end_of_local_day(start)?,
            });
        }
        PeriodKind::Week => {
            today - Duration::days(i64::from(today.weekday().num_days_from_sunday()))
        }
        PeriodKind::Month => NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today),
        PeriodKind::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
        PeriodKind::All | PeriodKind::Custom => return Some(PeriodWindow::Unbounded),
    };

    Some(PeriodWindow::Bounded {
        start: local_midnight(start_day, offset)?,
        end: now,
    })
}

fn lower_instant(bound: DateBound, offset: FixedOffset) -> Option<DateTime<Utc>> {
    match bound {
        DateBound::Instant(at) => Some(at.with_timezone(&Utc)),
        DateBound::Date(day) => local_midnight(day, offset),
    }
}

fn upper_instant(bound: DateBound, offset: FixedOffset) -> Option<DateTime<Utc>> {
    match bound {
        DateBound::Instant(at) => Some(at.with_timezone(&Utc)),
        DateBound::Date(day) => end_of_local_day(local_midnight(day, offset)?),
    }
}

/// UTC instant of 00:00 on `day` in the report timezone. `None` when the
/// shift to UTC leaves chrono's range.
pub(crate) fn local_midnight(day: NaiveDate, offset: FixedOffset) -> Option<DateTime<Utc>> {
    local_to_utc(day.and_time(NaiveTime::default()), offset)
}

fn local_to_utc(local: NaiveDateTime, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let utc = local.checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))?;
    Some(DateTime::<Utc>::from_naive_utc_and_offset(utc, Utc))
}

/// Last millisecond of the local day starting at `midnight`.
fn end_of_local_day(midnight: DateTime<Utc>) -> Option<DateTime<Utc>> {
    midnight
        .checked_add_signed(Duration::days(1))?
        .checked_sub_signed(Duration::milliseconds(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn monday_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    fn bounds(resolved: &ResolvedPeriod) -> (DateTime<Utc>, DateTime<Utc>) {
        match resolved.window {
            PeriodWindow::Bounded { start, end } => (start, end),
            PeriodWindow::Unbounded => panic!("expected a bounded window"),
        }
    }

    #[test]
    fn test_day_covers_local_calendar_day() {
        let resolved = resolve_period(None, None, Some("day"), monday_noon(), utc()).unwrap();
        assert_eq!(resolved.kind, PeriodKind::Day);

        let (start, end) = bounds(&resolved);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap());
        assert_eq!(
            end,
            Utc.with_ymd_and_hms(2024, 6, 10, 23, 59, 59).unwrap() + Duration::milliseconds(999)
        );
    }

    #[test]
    fn test_week_starts_on_sunday() {
        let resolved = resolve_period(None, None, Some("week"), monday_noon(), utc()).unwrap();
        let (start, end) = bounds(&resolved);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 6, 9, 0, 0, 0).unwrap());
        assert_eq!(end, monday_noon());
    }

    #[test]
    fn test_week_on_sunday_starts_today() {
        let sunday = Utc.with_ymd_and_hms(2024, 6, 9, 18, 30, 0).unwrap();
        let resolved = resolve_period(None, None, Some("week"), sunday, utc()).unwrap();
        let (start, _) = bounds(&resolved);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 6, 9, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_month_and_year() {
        let month = resolve_period(None, None, Some("month"), monday_noon(), utc()).unwrap();
        assert_eq!(bounds(&month).0, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());

        let year = resolve_period(None, None, Some("year"), monday_noon(), utc()).unwrap();
        assert_eq!(bounds(&year).0, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(bounds(&year).1, monday_noon());
    }

    #[test]
    fn test_all_and_unknown_are_unbounded() {
        for keyword in [None, Some("all"), Some("quarter")] {
            let resolved = resolve_period(None, None, keyword, monday_noon(), utc()).unwrap();
            assert_eq!(resolved.kind, PeriodKind::All);
            assert_eq!(resolved.window, PeriodWindow::Unbounded);
        }
    }

    #[test]
    fn test_explicit_bounds_win_over_keyword() {
        let resolved = resolve_period(
            Some("2024-01-01"),
            Some("2024-01-31"),
            Some("day"),
            monday_noon(),
            utc(),
        )
        .unwrap();

        assert_eq!(resolved.kind, PeriodKind::Custom);
        let (start, end) = bounds(&resolved);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(
            end,
            Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap() + Duration::milliseconds(999)
        );
    }

    #[test]
    fn test_explicit_instants_are_used_verbatim() {
        let resolved = resolve_period(
            Some("2024-01-01T06:00:00Z"),
            Some("2024-01-01T18:00:00+02:00"),
            None,
            monday_noon(),
            utc(),
        )
        .unwrap();
        let (start, end) = bounds(&resolved);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 1, 1, 16, 0, 0).unwrap());
    }

    #[test]
    fn test_single_bound_falls_back_to_keyword() {
        let resolved =
            resolve_period(Some("2024-01-01"), None, Some("month"), monday_noon(), utc()).unwrap();
        assert_eq!(resolved.kind, PeriodKind::Month);
    }

    #[test]
    fn test_malformed_dates_rejected() {
        let err = resolve_period(Some("01/02/2024"), Some("2024-02-01"), None, monday_noon(), utc())
            .unwrap_err();
        assert!(matches!(err, StatsError::Validation(_)));

        let err = resolve_period(None, Some("soon"), Some("day"), monday_noon(), utc()).unwrap_err();
        assert!(matches!(err, StatsError::Validation(_)));
    }

    #[test]
    fn test_far_future_bounds_rejected_without_panic() {
        let err = resolve_period(
            Some("2024-01-01"),
            Some("+262142-12-31"),
            None,
            monday_noon(),
            utc(),
        )
        .unwrap_err();
        assert!(matches!(err, StatsError::Validation(_)));
    }

    #[test]
    fn test_last_representable_day_rejected_without_panic() {
        // Midnight exists, but the end of that day does not.
        let last = NaiveDate::MAX;
        assert!(end_of_local_day(local_midnight(last, utc()).unwrap()).is_none());
        assert!(local_midnight(NaiveDate::MIN, FixedOffset::east_opt(3600).unwrap()).is_none());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = resolve_period(Some("2024-02-01"), Some("2024-01-01"), None, monday_noon(), utc())
            .unwrap_err();
        assert!(matches!(err, StatsError::Validation(_)));
    }

    #[test]
    fn test_same_day_bounds_cover_the_day() {
        let resolved =
            resolve_period(Some("2024-03-05"), Some("2024-03-05"), None, monday_noon(), utc())
                .unwrap();
        let (start, end) = bounds(&resolved);
        assert_eq!(end - start, Duration::days(1) - Duration::milliseconds(1));
    }

    #[test]
    fn test_day_respects_report_timezone() {
        // 01:30 UTC on the 10th is still the 9th at UTC-05:00.
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 1, 30, 0).unwrap();

        let resolved = resolve_period(None, None, Some("day"), now, offset).unwrap();
        let (start, _) = bounds(&resolved);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 6, 9, 5, 0, 0).unwrap());
    }
}
