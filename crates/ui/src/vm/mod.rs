mod chat_vm;
mod checklist_vm;
mod daily_vm;
mod dashboard_vm;
mod restaurant_vm;
mod schedule_vm;
mod time_fmt;

pub use chat_vm::{ChatInputVm, ChatLineVm, ChatVm};
pub use checklist_vm::{AuditSummaryVm, CategoryCardVm, map_category_cards, score_class};
pub use daily_vm::{DailySessionVm, DailyTemplateCardVm, map_daily_template_cards};
pub use dashboard_vm::DashboardVm;
pub use restaurant_vm::{
    NOT_ACCESSIBLE_MESSAGE, RestaurantCardVm, blocked_message, map_restaurant_cards,
    resume_prompt,
};
pub use schedule_vm::{
    VisitRowVm, WeekVm, WeeklyVm, parse_date_input, status_class, visit_date_bounds,
};
pub use time_fmt::{format_clock, format_date, format_long_date, last_audit_label};
