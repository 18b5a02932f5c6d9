use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use audit_core::model::{Access, AuditProgress, ProgressId, Restaurant, RestaurantId, UserDashboard};
use storage::repository::ClientStorage;

use crate::error::ServiceError;
use crate::rpc::{Endpoint, RpcClient};

/// What tapping a restaurant card leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The card is not clickable; nothing was stored.
    Blocked(Access),
    /// Saved answers exist; the host asks whether to continue or start over.
    ResumeOrRestart,
    Start,
}

#[derive(Deserialize)]
struct DashboardReply {
    dashboard: UserDashboard,
}

#[derive(Deserialize)]
struct RestaurantsReply {
    #[serde(default)]
    restaurants: Vec<Restaurant>,
}

/// Dashboard, restaurant list and the restaurant picked for an audit.
#[derive(Clone)]
pub struct RestaurantService {
    rpc: RpcClient,
    storage: ClientStorage,
}

impl RestaurantService {
    #[must_use]
    pub fn new(rpc: RpcClient, storage: ClientStorage) -> Self {
        Self { rpc, storage }
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Rpc` if the call fails or the reply has no dashboard.
    pub async fn dashboard(&self) -> Result<UserDashboard, ServiceError> {
        let reply: DashboardReply = self.rpc.call(Endpoint::GET_USER_DASHBOARD).await?;
        Ok(reply.dashboard)
    }

    /// Restaurants assigned to the user, each annotated with saved progress.
    ///
    /// Progress is looked up one restaurant at a time; a failed lookup is
    /// logged and leaves that restaurant without progress.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Rpc` if the list itself cannot be loaded.
    pub async fn restaurants_with_week_status(&self) -> Result<Vec<Restaurant>, ServiceError> {
        let reply: RestaurantsReply = self
            .rpc
            .call(Endpoint::GET_RESTAURANTS_WITH_WEEK_STATUS)
            .await?;
        let mut restaurants = reply.restaurants;
        for restaurant in &mut restaurants {
            match self.audit_progress(&restaurant.id).await {
                Ok(progress) => restaurant.attach_progress(progress),
                Err(err) => {
                    warn!(restaurant = %restaurant.id, error = %err, "progress lookup failed");
                }
            }
        }
        info!(count = restaurants.len(), "restaurants loaded");
        Ok(restaurants)
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Rpc` if the call fails.
    pub async fn audit_progress(
        &self,
        restaurant: &RestaurantId,
    ) -> Result<AuditProgress, ServiceError> {
        let progress = self
            .rpc
            .invoke(
                Endpoint::GET_AUDIT_PROGRESS,
                &json!({ "restaurant_id": restaurant }),
            )
            .await?;
        Ok(progress)
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Rpc` if the call fails.
    pub async fn delete_progress(&self, progress: &ProgressId) -> Result<(), ServiceError> {
        let _: serde_json::Value = self
            .rpc
            .invoke(
                Endpoint::DELETE_AUDIT_PROGRESS,
                &json!({ "progress_id": progress }),
            )
            .await?;
        Ok(())
    }

    /// Remember `restaurant` for the audit form if its card is clickable.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the selection cannot be stored.
    pub async fn select(&self, restaurant: &Restaurant) -> Result<Selection, ServiceError> {
        let access = restaurant.access();
        if access != Access::Open {
            return Ok(Selection::Blocked(access));
        }
        self.storage.session.set_selected_restaurant(restaurant).await?;
        if restaurant.has_progress && restaurant.progress_id().is_some() {
            Ok(Selection::ResumeOrRestart)
        } else {
            Ok(Selection::Start)
        }
    }

    /// Discard saved answers before a fresh audit. Deletion failures are only logged.
    pub async fn start_fresh(&self, restaurant: &Restaurant) {
        let Some(progress) = restaurant.progress_id() else {
            return;
        };
        if let Err(err) = self.delete_progress(progress).await {
            warn!(restaurant = %restaurant.id, error = %err, "could not delete saved progress");
        }
    }

    /// The restaurant picked on the list.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NoSelection` when nothing was picked.
    pub async fn selected(&self) -> Result<Restaurant, ServiceError> {
        self.storage
            .session
            .selected_restaurant()
            .await?
            .ok_or(ServiceError::NoSelection)
    }

    /// Forget the selection and every stored preference.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if a store cannot be cleared.
    pub async fn logout(&self) -> Result<(), ServiceError> {
        self.storage.clear_all().await?;
        info!("client state cleared");
        Ok(())
    }
}
