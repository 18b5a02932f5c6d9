#![forbid(unsafe_code)]

pub mod app_services;
pub mod chat;
pub mod checklist_service;
pub mod daily_audit_service;
pub mod error;
pub mod language_service;
pub mod restaurant_service;
pub mod rpc;
pub mod schedule_service;
pub mod walker;

pub use audit_core::Clock;

pub use app_services::AppServices;
pub use chat::{ChatMessage, ChatSession, Sender};
pub use checklist_service::{ChecklistService, Coordinates, LocationCheck};
pub use daily_audit_service::DailyAuditService;
pub use error::{
    AppServicesError, ConfigError, ErrorKind, RpcError, ScheduleVisitError, ServiceError,
    WalkerError,
};
pub use language_service::LanguageService;
pub use restaurant_service::{RestaurantService, Selection};
pub use rpc::{Endpoint, RpcClient, RpcConfig};
pub use schedule_service::{ScheduleService, WEEK_REFRESH_INTERVAL};
pub use walker::{Effect, QuestionnaireWalker, WalkerEvent, WalkerPhase};
