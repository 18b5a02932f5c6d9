use chrono::NaiveDate;
use thiserror::Error;

/// How far ahead a visit may be booked.
pub const MAX_DAYS_AHEAD: i64 = 21;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScheduleError {
    #[error("visit date {date} is in the past")]
    InPast { date: NaiveDate },
    #[error("visit date {date} is more than {max} days ahead")]
    TooFarAhead { date: NaiveDate, max: i64 },
}

/// Checks a requested visit date against today.
///
/// Today itself is allowed, as is the last day of the booking horizon.
///
/// # Errors
///
/// Returns `ScheduleError::InPast` for dates before `today` and
/// `ScheduleError::TooFarAhead` for dates beyond `MAX_DAYS_AHEAD`.
pub fn validate_visit_date(date: NaiveDate, today: NaiveDate) -> Result<(), ScheduleError> {
    let ahead = (date - today).num_days();
    if ahead < 0 {
        return Err(ScheduleError::InPast { date });
    }
    if ahead > MAX_DAYS_AHEAD {
        return Err(ScheduleError::TooFarAhead {
            date,
            max: MAX_DAYS_AHEAD,
        });
    }
    Ok(())
}

/// Whole days since `last`, or `None` when `last` lies in the future.
#[must_use]
pub fn elapsed_days(last: NaiveDate, today: NaiveDate) -> Option<u32> {
    u32::try_from((today - last).num_days()).ok()
}

/// Weekly views are refreshed once per calendar day.
#[must_use]
pub fn is_new_day(last_refresh: Option<NaiveDate>, today: NaiveDate) -> bool {
    last_refresh != Some(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn today_and_horizon_are_accepted() {
        let today = d(2026, 3, 2);
        assert!(validate_visit_date(today, today).is_ok());
        assert!(validate_visit_date(d(2026, 3, 23), today).is_ok());
    }

    #[test]
    fn past_and_far_dates_are_rejected() {
        let today = d(2026, 3, 2);
        assert_eq!(
            validate_visit_date(d(2026, 3, 1), today),
            Err(ScheduleError::InPast { date: d(2026, 3, 1) })
        );
        assert!(matches!(
            validate_visit_date(d(2026, 3, 24), today),
            Err(ScheduleError::TooFarAhead { max: 21, .. })
        ));
    }

    #[test]
    fn future_last_audit_has_no_elapsed_days() {
        let today = d(2026, 3, 2);
        assert_eq!(elapsed_days(d(2026, 2, 23), today), Some(7));
        assert_eq!(elapsed_days(today, today), Some(0));
        assert_eq!(elapsed_days(d(2026, 3, 5), today), None);
    }

    #[test]
    fn refresh_once_per_day() {
        let today = d(2026, 3, 2);
        assert!(is_new_day(None, today));
        assert!(is_new_day(Some(d(2026, 3, 1)), today));
        assert!(!is_new_day(Some(today), today));
    }
}
