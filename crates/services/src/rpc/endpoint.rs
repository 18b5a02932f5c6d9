use std::fmt;

/// A whitelisted backend method, addressed as `restaurant_audit.api.{module}.{name}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub module: &'static str,
    pub name: &'static str,
}

impl Endpoint {
    pub const GET_CHECKLIST_TEMPLATE: Self = Self::audit("get_checklist_template");
    pub const SUBMIT_AUDIT: Self = Self::audit("submit_audit");
    pub const VALIDATE_LOCATION: Self = Self::audit("validate_location");
    pub const GET_USER_DASHBOARD: Self = Self::audit("get_user_dashboard");
    pub const GET_RESTAURANTS_WITH_WEEK_STATUS: Self =
        Self::audit("get_restaurants_with_week_status");
    pub const GET_AUDIT_PROGRESS: Self = Self::audit("get_audit_progress");
    pub const DELETE_AUDIT_PROGRESS: Self = Self::audit("delete_audit_progress");
    pub const SCHEDULE_AUDIT_VISIT: Self = Self::audit("schedule_audit_visit");
    pub const GET_WEEKLY_SCHEDULED_AUDITS: Self = Self::audit("get_weekly_scheduled_audits");
    pub const GET_MY_WEEKLY_VISITS: Self = Self::audit("get_my_weekly_visits");
    pub const PROCESS_LAST_WEEK_STATUS: Self = Self::audit("process_last_week_status");
    pub const GET_DAILY_TEMPLATES: Self = Self::audit("get_daily_templates");
    pub const CAN_START_DAILY_AUDIT: Self = Self::audit("can_start_daily_audit");
    pub const START_DAILY_AUDIT: Self = Self::audit("start_daily_audit");

    pub const GET_TRANSLATIONS: Self = Self::translation("get_translations");
    pub const SET_USER_LANGUAGE: Self = Self::translation("set_user_language");

    const fn audit(name: &'static str) -> Self {
        Self {
            module: "audit_api",
            name,
        }
    }

    const fn translation(name: &'static str) -> Self {
        Self {
            module: "translation_api",
            name,
        }
    }

    /// Path relative to the configured base URL.
    #[must_use]
    pub fn path(&self) -> String {
        format!(
            "api/method/restaurant_audit.api.{}.{}",
            self.module, self.name
        )
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
