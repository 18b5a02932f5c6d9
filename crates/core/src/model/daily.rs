use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::model::wire;
use crate::model::{ProgressId, RestaurantId, TemplateName};

/// Daily opening window of a template. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateWindow {
    pub open: NaiveTime,
    pub close: NaiveTime,
    pub cashier_open: NaiveTime,
}

impl Default for TemplateWindow {
    fn default() -> Self {
        Self {
            open: hm(6, 0),
            close: hm(8, 30),
            cashier_open: hm(9, 0),
        }
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

impl TemplateWindow {
    #[must_use]
    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        self.open <= time && time <= self.close
    }
}

/// An active Daily Audit Template from `get_daily_templates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTemplate {
    pub name: TemplateName,
    #[serde(default, deserialize_with = "wire::text")]
    pub template_name: String,
    #[serde(default, deserialize_with = "wire::optional_text")]
    pub description: Option<String>,
    #[serde(default)]
    pub restaurant: Option<RestaurantId>,
    #[serde(default, deserialize_with = "wire::optional_text")]
    pub restaurant_name: Option<String>,
    #[serde(default, deserialize_with = "clock_time")]
    pub open_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "clock_time")]
    pub close_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "clock_time")]
    pub cashier_opening_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "wire::count")]
    pub questions_count: u32,
    #[serde(default, deserialize_with = "wire::count")]
    pub estimated_duration: u32,
    #[serde(default, deserialize_with = "wire::optional_text")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "wire::flag")]
    pub applies_to_all_restaurants: bool,
    #[serde(default, deserialize_with = "wire::optional_text")]
    pub current_status: Option<String>,
    #[serde(default, deserialize_with = "wire::flag")]
    pub is_currently_open: bool,
}

impl DailyTemplate {
    /// Window from the template times, falling back to the defaults per field.
    #[must_use]
    pub fn window(&self) -> TemplateWindow {
        let default = TemplateWindow::default();
        TemplateWindow {
            open: self.open_time.unwrap_or(default.open),
            close: self.close_time.unwrap_or(default.close),
            cashier_open: self.cashier_opening_time.unwrap_or(default.cashier_open),
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.template_name.is_empty() {
            self.name.as_str()
        } else {
            &self.template_name
        }
    }
}

/// Payload kept in session storage while a daily audit is being answered.
///
/// The template and question rows are replayed to the form as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAuditSession {
    #[serde(default)]
    pub template: Value,
    #[serde(default, deserialize_with = "wire::list")]
    pub questions_data: Vec<Value>,
    #[serde(default)]
    pub progress_id: Option<ProgressId>,
    #[serde(default)]
    pub restaurant: Option<RestaurantId>,
    #[serde(default = "yes")]
    pub is_daily_audit: bool,
}

fn yes() -> bool {
    true
}

impl DailyAuditSession {
    #[must_use]
    pub fn questions_count(&self) -> usize {
        self.questions_data.len()
    }
}

/// Accepts `HH:MM:SS`, `HH:MM` and the single-digit hours the backend emits for
/// time deltas (`6:00:00`).
fn clock_time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map(Some)
        .map_err(serde::de::Error::custom)
}
