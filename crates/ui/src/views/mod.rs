mod audit;
mod chat;
mod daily;
mod restaurants;
mod schedule;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use audit::AuditView;
pub use chat::ChatModal;
pub use daily::{DailyAuditSessionView, DailyAuditsView};
pub use restaurants::RestaurantsView;
pub use schedule::{ScheduleView, ScheduleVisitForm};
pub use state::{ViewError, ViewState, view_state_from_resource};
