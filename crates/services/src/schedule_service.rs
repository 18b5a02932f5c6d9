use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::info;

use audit_core::model::{RestaurantId, WeeklyVisits};
use audit_core::schedule::{is_new_day, validate_visit_date};
use storage::repository::PreferencesRepository;

use crate::error::{ScheduleVisitError, ServiceError};
use crate::rpc::{Endpoint, RpcClient};
use crate::Clock;

#[derive(Deserialize)]
struct MessageReply {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct LastWeekReply {
    #[serde(default)]
    updates_made: u32,
}

/// How often the UI asks whether the week periods rolled over.
pub const WEEK_REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Visit booking and the weekly schedule views.
#[derive(Clone)]
pub struct ScheduleService {
    clock: Clock,
    rpc: RpcClient,
    preferences: Arc<dyn PreferencesRepository>,
    refresh_lock: Arc<Mutex<()>>,
}

impl ScheduleService {
    #[must_use]
    pub fn new(clock: Clock, rpc: RpcClient, preferences: Arc<dyn PreferencesRepository>) -> Self {
        Self {
            clock,
            rpc,
            preferences,
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Book a visit to `restaurant` on `date`.
    ///
    /// The error is handed back untouched so the form that triggered the
    /// booking can decide whether to reset.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleVisitError::InvalidDate` for a date before today or
    /// beyond the booking horizon, and `ScheduleVisitError::Rpc` if the call fails.
    pub async fn schedule_visit(
        &self,
        restaurant: &RestaurantId,
        date: NaiveDate,
    ) -> Result<String, ScheduleVisitError> {
        validate_visit_date(date, self.clock.today())?;
        let reply: MessageReply = self
            .rpc
            .invoke(
                Endpoint::SCHEDULE_AUDIT_VISIT,
                &json!({
                    "restaurant": restaurant,
                    "visit_date": date.format("%Y-%m-%d").to_string(),
                }),
            )
            .await?;
        info!(restaurant = %restaurant, %date, "visit scheduled");
        Ok(reply
            .message
            .unwrap_or_else(|| "Audit visit scheduled successfully".to_string()))
    }

    /// Visits of the whole team for this week and next.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Rpc` if the call fails.
    pub async fn weekly_scheduled_audits(&self) -> Result<WeeklyVisits, ServiceError> {
        Ok(self.rpc.call(Endpoint::GET_WEEKLY_SCHEDULED_AUDITS).await?)
    }

    /// The signed-in auditor's own visits for this week and next.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Rpc` if the call fails.
    pub async fn my_weekly_visits(&self) -> Result<WeeklyVisits, ServiceError> {
        Ok(self.rpc.call(Endpoint::GET_MY_WEEKLY_VISITS).await?)
    }

    /// Ask the backend to mark last week's unfinished visits overdue.
    ///
    /// Returns how many visits changed.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Rpc` if the call fails.
    pub async fn process_last_week_status(&self) -> Result<u32, ServiceError> {
        let reply: LastWeekReply = self.rpc.call(Endpoint::PROCESS_LAST_WEEK_STATUS).await?;
        if reply.updates_made > 0 {
            info!(updates = reply.updates_made, "last week's visits marked overdue");
        }
        Ok(reply.updates_made)
    }

    /// True when the weekly views were never refreshed or last refreshed on another day.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the stored timestamp cannot be read.
    pub async fn refresh_due(&self) -> Result<bool, ServiceError> {
        let last = self.preferences.last_week_refresh().await?;
        let last_day = last.map(|at| self.clock.date_of(at));
        Ok(is_new_day(last_day, self.clock.today()))
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the timestamp cannot be stored.
    pub async fn mark_refreshed(&self) -> Result<(), ServiceError> {
        self.preferences
            .set_last_week_refresh(self.clock.now())
            .await?;
        Ok(())
    }

    /// Process last week's visits once per calendar day.
    ///
    /// Returns `Some(updates)` when the day changed since the last run, in
    /// which case restaurant and visit lists should be reloaded. Concurrent
    /// callers are serialised so the backend sees one call per day.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the check, the call or the bookkeeping fails.
    /// The refresh stays due after a failure.
    pub async fn refresh_week_periods(&self) -> Result<Option<u32>, ServiceError> {
        let _guard = self.refresh_lock.lock().await;
        if !self.refresh_due().await? {
            return Ok(None);
        }
        let updates = self.process_last_week_status().await?;
        self.mark_refreshed().await?;
        Ok(Some(updates))
    }
}
