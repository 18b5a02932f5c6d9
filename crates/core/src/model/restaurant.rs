use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::wire;
use crate::model::{ProgressId, RestaurantId};

/// Audit radius used when the backend leaves `location_radius` unset.
pub const DEFAULT_LOCATION_RADIUS_M: u32 = 100;

fn default_status() -> String {
    "active".to_string()
}

fn default_radius() -> u32 {
    DEFAULT_LOCATION_RADIUS_M
}

/// Saved, not yet submitted answers for a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditProgress {
    #[serde(default, deserialize_with = "wire::flag")]
    pub has_progress: bool,
    #[serde(default)]
    pub progress_id: Option<ProgressId>,
    #[serde(default, deserialize_with = "wire::optional_text")]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub answers: BTreeMap<String, Value>,
}

impl AuditProgress {
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }
}

/// A restaurant row from `get_restaurants_with_week_status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(rename = "name")]
    pub id: RestaurantId,
    #[serde(rename = "restaurant_name", default, deserialize_with = "wire::text")]
    pub display_name: String,
    #[serde(default, deserialize_with = "wire::optional_text")]
    pub address: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default = "default_radius", deserialize_with = "radius")]
    pub location_radius: u32,
    #[serde(default, deserialize_with = "wire::optional_text")]
    pub employee_name: Option<String>,
    #[serde(default, deserialize_with = "wire::optional_text")]
    pub designation: Option<String>,
    #[serde(default, deserialize_with = "wire::count")]
    pub total_audits: u32,
    #[serde(default, deserialize_with = "wire::count")]
    pub my_audits: u32,
    #[serde(default)]
    pub last_audit_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "wire::flag")]
    pub week_complete: bool,
    #[serde(default, deserialize_with = "wire::optional_text")]
    pub week_message: Option<String>,
    #[serde(default)]
    pub next_access: Option<NaiveDate>,
    #[serde(default, deserialize_with = "wire::flag")]
    pub can_access: bool,
    #[serde(default, deserialize_with = "wire::flag")]
    pub has_progress: bool,
    #[serde(default)]
    pub progress_data: Option<AuditProgress>,
}

/// Whether a restaurant card can start an audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Open,
    WeekComplete {
        message: Option<String>,
        next_access: Option<NaiveDate>,
    },
    Denied,
}

impl Restaurant {
    #[must_use]
    pub fn access(&self) -> Access {
        if self.week_complete {
            Access::WeekComplete {
                message: self.week_message.clone(),
                next_access: self.next_access,
            }
        } else if self.can_access {
            Access::Open
        } else {
            Access::Denied
        }
    }

    #[must_use]
    pub fn is_clickable(&self) -> bool {
        matches!(self.access(), Access::Open)
    }

    /// Attach progress found by `get_audit_progress`; ignored unless it has answers saved.
    pub fn attach_progress(&mut self, progress: AuditProgress) {
        if progress.has_progress {
            self.has_progress = true;
            self.progress_data = Some(progress);
        }
    }

    #[must_use]
    pub fn progress_id(&self) -> Option<&ProgressId> {
        self.progress_data
            .as_ref()
            .and_then(|p| p.progress_id.as_ref())
    }
}

fn radius<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let n = wire::count(deserializer)?;
    Ok(if n == 0 { DEFAULT_LOCATION_RADIUS_M } else { n })
}
