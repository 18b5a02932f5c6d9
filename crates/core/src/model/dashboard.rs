use serde::{Deserialize, Serialize};

use crate::model::wire;
use crate::model::{ProgressId, RestaurantId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardUser {
    pub name: String,
    #[serde(default, deserialize_with = "wire::optional_text")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "wire::optional_text")]
    pub email: Option<String>,
}

impl DashboardUser {
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    #[serde(default, deserialize_with = "wire::optional_text")]
    pub employee_name: Option<String>,
    #[serde(default, deserialize_with = "wire::optional_text")]
    pub designation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "wire::count")]
    pub total_audits: u32,
    #[serde(default)]
    pub avg_score: Option<f64>,
}

impl DashboardStats {
    /// Average score with one decimal, `0.0` when no audit was scored.
    #[must_use]
    pub fn avg_score_label(&self) -> String {
        format!("{:.1}", self.avg_score.unwrap_or(0.0))
    }
}

/// An unfinished audit listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingProgress {
    pub name: ProgressId,
    pub restaurant: RestaurantId,
    #[serde(default)]
    pub completion_percentage: Option<f64>,
}

/// Payload of `get_user_dashboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDashboard {
    pub user: DashboardUser,
    #[serde(default)]
    pub employee: Option<Employee>,
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default, deserialize_with = "wire::list")]
    pub pending_progress: Vec<PendingProgress>,
}

impl UserDashboard {
    /// Upper-cased first letter of the display name, for the avatar.
    #[must_use]
    pub fn initial(&self) -> String {
        self.user
            .display_name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_dashboard_and_derives_avatar() {
        let d: UserDashboard = serde_json::from_value(json!({
            "user": {"name": "auditor@example.com", "full_name": "nadia karim", "email": null},
            "employee": {"name": "HR-EMP-0001", "employee_name": "Nadia Karim", "designation": "Auditor"},
            "stats": {"total_audits": 12, "avg_score": 4.27},
            "pending_progress": [
                {"name": "PRG-1", "restaurant": "REST-1", "completion_percentage": 40}
            ]
        }))
        .unwrap();
        assert_eq!(d.initial(), "N");
        assert_eq!(d.stats.avg_score_label(), "4.3");
        assert_eq!(d.pending_progress.len(), 1);
    }

    #[test]
    fn missing_full_name_falls_back_to_user_id() {
        let d: UserDashboard = serde_json::from_value(json!({
            "user": {"name": "x@example.com"},
            "employee": null
        }))
        .unwrap();
        assert_eq!(d.user.display_name(), "x@example.com");
        assert_eq!(d.stats.avg_score_label(), "0.0");
        assert!(d.pending_progress.is_empty());
    }
}
