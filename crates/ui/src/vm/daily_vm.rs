use chrono::NaiveTime;

use audit_core::model::{DailyAuditSession, DailyTemplate, TemplateName};

use crate::vm::time_fmt::format_clock;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyTemplateCardVm {
    pub name: TemplateName,
    pub title: String,
    pub description: Option<String>,
    pub restaurant: String,
    pub window: String,
    pub cashier_opens: String,
    pub questions: u32,
    pub duration: Option<String>,
    pub priority: Option<String>,
    pub open: bool,
    pub status: String,
}

impl DailyTemplateCardVm {
    /// The backend flag wins; otherwise the window decides at `now`.
    #[must_use]
    pub fn new(template: &DailyTemplate, now: NaiveTime) -> Self {
        let window = template.window();
        let open = template.is_currently_open || window.is_open_at(now);
        let restaurant = if template.applies_to_all_restaurants {
            "All restaurants".to_string()
        } else {
            template
                .restaurant_name
                .clone()
                .or_else(|| template.restaurant.as_ref().map(|r| r.as_str().to_string()))
                .unwrap_or_default()
        };
        let status = template
            .current_status
            .clone()
            .unwrap_or_else(|| if open { "Open" } else { "Closed" }.to_string());
        Self {
            name: template.name.clone(),
            title: template.display_name().to_string(),
            description: template.description.clone(),
            restaurant,
            window: format!("{} - {}", format_clock(window.open), format_clock(window.close)),
            cashier_opens: format_clock(window.cashier_open),
            questions: template.questions_count,
            duration: (template.estimated_duration > 0)
                .then(|| format!("{} min", template.estimated_duration)),
            priority: template.priority.clone(),
            open,
            status,
        }
    }

    #[must_use]
    pub fn badge_class(&self) -> &'static str {
        if self.open { "badge open" } else { "badge closed" }
    }
}

#[must_use]
pub fn map_daily_template_cards(templates: &[DailyTemplate], now: NaiveTime) -> Vec<DailyTemplateCardVm> {
    templates
        .iter()
        .map(|t| DailyTemplateCardVm::new(t, now))
        .collect()
}

/// What the in-progress daily audit page shows about the saved payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailySessionVm {
    pub title: String,
    pub questions: usize,
    pub progress: Option<String>,
    pub restaurant: Option<String>,
}

impl From<&DailyAuditSession> for DailySessionVm {
    fn from(session: &DailyAuditSession) -> Self {
        let title = session
            .template
            .as_str()
            .or_else(|| {
                ["template_name", "name"]
                    .iter()
                    .find_map(|key| session.template.get(key).and_then(|v| v.as_str()))
            })
            .unwrap_or("Daily Audit")
            .to_string();
        Self {
            title,
            questions: session.questions_count(),
            progress: session.progress_id.as_ref().map(|p| p.as_str().to_string()),
            restaurant: session.restaurant.as_ref().map(|r| r.as_str().to_string()),
        }
    }
}
