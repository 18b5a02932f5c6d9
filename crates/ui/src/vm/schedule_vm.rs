use chrono::{Duration, NaiveDate};

use audit_core::model::{ScheduledVisit, VisitStatus, WeekSummary, WeekWindow, WeeklyVisits};
use audit_core::schedule::MAX_DAYS_AHEAD;

use crate::vm::time_fmt::format_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitRowVm {
    pub restaurant: String,
    pub date: String,
    pub status: String,
    pub status_class: &'static str,
}

impl From<&ScheduledVisit> for VisitRowVm {
    fn from(visit: &ScheduledVisit) -> Self {
        let restaurant = if visit.restaurant_name.is_empty() {
            visit.restaurant.as_str().to_string()
        } else {
            visit.restaurant_name.clone()
        };
        Self {
            restaurant,
            date: format_date(visit.visit_date),
            status: visit.status.label().to_string(),
            status_class: status_class(&visit.status),
        }
    }
}

#[must_use]
pub fn status_class(status: &VisitStatus) -> &'static str {
    match status {
        VisitStatus::Pending => "badge pending",
        VisitStatus::Completed => "badge completed",
        VisitStatus::Overdue => "badge overdue",
        VisitStatus::Cancelled => "badge cancelled",
        VisitStatus::Other(_) => "badge",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekVm {
    pub heading: &'static str,
    pub range: Option<String>,
    pub summary: WeekSummary,
    pub rows: Vec<VisitRowVm>,
}

impl WeekVm {
    fn new(heading: &'static str, week: &WeekWindow) -> Self {
        let range = match (week.start, week.end) {
            (Some(start), Some(end)) => Some(format!("{} - {}", format_date(start), format_date(end))),
            _ => None,
        };
        Self {
            heading,
            range,
            summary: week.summary(),
            rows: week.visits.iter().map(VisitRowVm::from).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeeklyVm {
    pub current: WeekVm,
    pub next: WeekVm,
    /// Reminder shown while nothing is booked for next week.
    pub next_week_reminder: bool,
}

impl From<&WeeklyVisits> for WeeklyVm {
    fn from(weekly: &WeeklyVisits) -> Self {
        Self {
            current: WeekVm::new("This Week", &weekly.current_week),
            next: WeekVm::new("Next Week", &weekly.next_week),
            next_week_reminder: weekly.next_week_unscheduled(),
        }
    }
}

/// `min` and `max` of the visit date picker.
#[must_use]
pub fn visit_date_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today, today + Duration::days(MAX_DAYS_AHEAD))
}

/// Parse the `YYYY-MM-DD` value of a date input.
#[must_use]
pub fn parse_date_input(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn weekly_view_summarises_each_week() {
        let weekly: WeeklyVisits = serde_json::from_value(json!({
            "current_week": {
                "start": "2026-03-02",
                "end": "2026-03-08",
                "visits": [
                    {"name": "V-1", "restaurant": "REST-1", "restaurant_name": "Harbor Grill",
                     "visit_date": "2026-03-03", "status": "Completed"},
                    {"name": "V-2", "restaurant": "REST-2", "visit_date": "2026-03-05",
                     "status": "Pending"}
                ]
            },
            "next_week": {"start": "2026-03-09", "end": "2026-03-15", "visits": []}
        }))
        .unwrap();

        let vm = WeeklyVm::from(&weekly);
        assert_eq!(vm.current.summary.completed, 1);
        assert_eq!(vm.current.summary.pending, 1);
        assert_eq!(vm.current.range.as_deref(), Some("Mar 2, 2026 - Mar 8, 2026"));
        assert_eq!(vm.current.rows[1].restaurant, "REST-2");
        assert_eq!(vm.current.rows[0].status_class, "badge completed");
        assert!(vm.next_week_reminder);
    }

    #[test]
    fn picker_spans_three_weeks() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let (min, max) = visit_date_bounds(today);
        assert_eq!(min, today);
        assert_eq!(max, NaiveDate::from_ymd_opt(2026, 3, 23).unwrap());
        assert_eq!(parse_date_input(" 2026-03-10 "), NaiveDate::from_ymd_opt(2026, 3, 10));
        assert_eq!(parse_date_input(""), None);
    }
}
