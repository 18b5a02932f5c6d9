use chrono::{NaiveDate, NaiveTime};

use audit_core::schedule::elapsed_days;

#[must_use]
pub fn format_date(value: NaiveDate) -> String {
    value.format("%b %-d, %Y").to_string()
}

#[must_use]
pub fn format_long_date(value: NaiveDate) -> String {
    value.format("%A, %B %-d, %Y").to_string()
}

/// `HH:MM`, as the template windows are shown.
#[must_use]
pub fn format_clock(value: NaiveTime) -> String {
    value.format("%H:%M").to_string()
}

/// `Never`, `N days ago`, or the date itself when it lies in the future.
#[must_use]
pub fn last_audit_label(last: Option<NaiveDate>, today: NaiveDate) -> String {
    match last {
        None => "Never".to_string(),
        Some(date) => match elapsed_days(date, today) {
            Some(days) => format!("{days} days ago"),
            None => format_date(date),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn last_audit_label_counts_days() {
        let today = d(2026, 3, 2);
        assert_eq!(last_audit_label(None, today), "Never");
        assert_eq!(last_audit_label(Some(d(2026, 2, 27)), today), "3 days ago");
        assert_eq!(last_audit_label(Some(today), today), "0 days ago");
    }

    #[test]
    fn future_audit_date_is_shown_as_a_date() {
        let today = d(2026, 3, 2);
        assert_eq!(last_audit_label(Some(d(2026, 3, 9)), today), "Mar 9, 2026");
    }

    #[test]
    fn clock_is_hours_and_minutes() {
        let t = NaiveTime::from_hms_opt(6, 5, 0).unwrap();
        assert_eq!(format_clock(t), "06:05");
        assert_eq!(format_long_date(d(2026, 3, 9)), "Monday, March 9, 2026");
    }
}
