use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::wire;
use crate::model::{RestaurantId, VisitId};

/// Lifecycle of a scheduled visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitStatus {
    Pending,
    Completed,
    Overdue,
    Cancelled,
    Other(String),
}

impl VisitStatus {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Pending" | "Scheduled" | "" => Self::Pending,
            "Completed" => Self::Completed,
            "Overdue" => Self::Overdue,
            "Cancelled" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
            Self::Cancelled => "Cancelled",
            Self::Other(raw) => raw,
        }
    }
}

impl Serialize for VisitStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for VisitStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = wire::text(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// A Scheduled Audit Visit row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledVisit {
    #[serde(rename = "name")]
    pub id: VisitId,
    pub restaurant: RestaurantId,
    #[serde(default, deserialize_with = "wire::text")]
    pub restaurant_name: String,
    pub visit_date: NaiveDate,
    #[serde(default = "pending")]
    pub status: VisitStatus,
}

fn pending() -> VisitStatus {
    VisitStatus::Pending
}

/// One calendar week of visits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(
        default,
        alias = "scheduled_audits",
        deserialize_with = "wire::list"
    )]
    pub visits: Vec<ScheduledVisit>,
}

/// Totals shown in the weekly summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl WeekWindow {
    #[must_use]
    pub fn summary(&self) -> WeekSummary {
        let total = self.visits.len();
        let completed = self
            .visits
            .iter()
            .filter(|v| v.status == VisitStatus::Completed)
            .count();
        WeekSummary {
            total,
            completed,
            pending: total - completed,
        }
    }
}

/// Current and next week, as returned by the weekly visit endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyVisits {
    pub current_week: WeekWindow,
    pub next_week: WeekWindow,
}

impl WeeklyVisits {
    /// Nothing is booked for next week yet.
    #[must_use]
    pub fn next_week_unscheduled(&self) -> bool {
        self.next_week.visits.is_empty()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current_week.visits.is_empty() && self.next_week.visits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weekly() -> WeeklyVisits {
        serde_json::from_value(json!({
            "current_week": {
                "start": "2026-03-02",
                "end": "2026-03-08",
                "visits": [
                    {"name": "V1", "restaurant": "R1", "restaurant_name": "One",
                     "visit_date": "2026-03-03", "status": "Completed"},
                    {"name": "V2", "restaurant": "R2", "restaurant_name": "Two",
                     "visit_date": "2026-03-05", "status": "Pending"},
                    {"name": "V3", "restaurant": "R3", "restaurant_name": "Three",
                     "visit_date": "2026-03-06", "status": null}
                ]
            },
            "next_week": {"start": "2026-03-09", "end": "2026-03-15", "scheduled_audits": []}
        }))
        .unwrap()
    }

    #[test]
    fn summary_counts_completed_and_pending() {
        let summary = weekly().current_week.summary();
        assert_eq!(
            summary,
            WeekSummary {
                total: 3,
                completed: 1,
                pending: 2
            }
        );
    }

    #[test]
    fn empty_next_week_is_flagged() {
        let w = weekly();
        assert!(w.next_week_unscheduled());
        assert!(!w.is_empty());
    }

    #[test]
    fn unknown_status_keeps_its_label() {
        let status = VisitStatus::parse("In Progress");
        assert_eq!(status, VisitStatus::Other("In Progress".into()));
        assert_eq!(status.label(), "In Progress");
    }
}
