use std::sync::Arc;

use storage::repository::ClientStorage;

use crate::checklist_service::ChecklistService;
use crate::daily_audit_service::DailyAuditService;
use crate::error::AppServicesError;
use crate::language_service::LanguageService;
use crate::restaurant_service::RestaurantService;
use crate::rpc::{RpcClient, RpcConfig};
use crate::schedule_service::ScheduleService;
use crate::Clock;

/// Assembles app-facing services over one RPC client and one client store.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    checklists: Arc<ChecklistService>,
    restaurants: Arc<RestaurantService>,
    schedule: Arc<ScheduleService>,
    daily_audits: Arc<DailyAuditService>,
    language: Arc<LanguageService>,
}

impl AppServices {
    #[must_use]
    pub fn new(clock: Clock, rpc: RpcClient, storage: ClientStorage) -> Self {
        Self {
            clock,
            checklists: Arc::new(ChecklistService::new(rpc.clone())),
            restaurants: Arc::new(RestaurantService::new(rpc.clone(), storage.clone())),
            schedule: Arc::new(ScheduleService::new(
                clock,
                rpc.clone(),
                Arc::clone(&storage.preferences),
            )),
            daily_audits: Arc::new(DailyAuditService::new(
                rpc.clone(),
                Arc::clone(&storage.session),
            )),
            language: Arc::new(LanguageService::new(rpc, Arc::clone(&storage.preferences))),
        }
    }

    /// Build services whose preferences live in `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the database or the HTTP client cannot be set up.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: RpcConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = ClientStorage::sqlite(db_url).await?;
        let rpc = RpcClient::new(config)?;
        Ok(Self::new(clock, rpc, storage))
    }

    /// Build services with in-memory client state.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Rpc` if the HTTP client cannot be set up.
    pub fn in_memory(clock: Clock, config: RpcConfig) -> Result<Self, AppServicesError> {
        let rpc = RpcClient::new(config)?;
        Ok(Self::new(clock, rpc, ClientStorage::in_memory()))
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn checklists(&self) -> Arc<ChecklistService> {
        Arc::clone(&self.checklists)
    }

    #[must_use]
    pub fn restaurants(&self) -> Arc<RestaurantService> {
        Arc::clone(&self.restaurants)
    }

    #[must_use]
    pub fn schedule(&self) -> Arc<ScheduleService> {
        Arc::clone(&self.schedule)
    }

    #[must_use]
    pub fn daily_audits(&self) -> Arc<DailyAuditService> {
        Arc::clone(&self.daily_audits)
    }

    #[must_use]
    pub fn language(&self) -> Arc<LanguageService> {
        Arc::clone(&self.language)
    }
}
