mod answer;
mod checklist;
mod daily;
mod dashboard;
mod filter;
mod follow_up;
mod ids;
mod image;
mod language;
mod question;
mod restaurant;
mod visit;
mod wire;

pub use answer::{Answer, AnswerSheet, rounded_percent};
pub use checklist::{
    AuditChecklist, CATEGORY_ICONS, Category, ChecklistTemplate, ScoreBand, SubmissionRow,
    TemplateCategory,
};
pub use daily::{DailyAuditSession, DailyTemplate, TemplateWindow};
pub use dashboard::{DashboardStats, DashboardUser, Employee, PendingProgress, UserDashboard};
pub use filter::{RestaurantFilter, StatusFilter};
pub use follow_up::{FollowUpKind, FollowUpTask, FollowUpValue};
pub use ids::{CategoryId, ParseIdError, ProgressId, QuestionId, RestaurantId, TemplateName, VisitId};
pub use image::{ImageError, encode_image, is_image_data_uri, sniff_image_mime};
pub use language::{Catalog, Language, TextDirection, UnknownLanguage};
pub use question::{AnswerChoice, AnswerType, AnswerValue, MAX_SCORE, Question, Verdict};
pub use restaurant::{Access, AuditProgress, DEFAULT_LOCATION_RADIUS_M, Restaurant};
pub use visit::{ScheduledVisit, VisitStatus, WeekSummary, WeekWindow, WeeklyVisits};
