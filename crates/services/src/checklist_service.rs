use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use audit_core::model::{AuditChecklist, ChecklistTemplate, RestaurantId};

use crate::error::ServiceError;
use crate::rpc::{Endpoint, RpcClient};

/// Position reported by the host device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Outcome of a location check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationCheck {
    Verified,
    OutOfRange(String),
}

#[derive(Deserialize)]
struct TemplatesReply {
    #[serde(default)]
    templates: Vec<ChecklistTemplate>,
}

#[derive(Deserialize)]
struct LocationReply {
    #[serde(default)]
    is_within_range: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct MessageReply {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
struct SubmitPayload<'a> {
    restaurant_id: &'a RestaurantId,
    answers: String,
    overall_comment: &'a str,
}

/// Loads, checks and submits the audit checklist of one restaurant.
#[derive(Clone)]
pub struct ChecklistService {
    rpc: RpcClient,
}

impl ChecklistService {
    #[must_use]
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    /// Fetch every template that applies to `restaurant` and flatten them into one checklist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Rpc` if the call fails.
    pub async fn load_checklist(
        &self,
        restaurant: &RestaurantId,
    ) -> Result<AuditChecklist, ServiceError> {
        let reply: TemplatesReply = self
            .rpc
            .invoke(
                Endpoint::GET_CHECKLIST_TEMPLATE,
                &json!({ "restaurant_id": restaurant }),
            )
            .await?;
        let checklist = AuditChecklist::from_templates(reply.templates);
        info!(
            restaurant = %restaurant,
            questions = checklist.total_questions(),
            "checklist loaded"
        );
        Ok(checklist)
    }

    /// Ask the backend whether `position` is close enough to the restaurant.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Rpc` if the call fails.
    pub async fn validate_location(
        &self,
        restaurant: &RestaurantId,
        position: Coordinates,
    ) -> Result<LocationCheck, ServiceError> {
        let reply: LocationReply = self
            .rpc
            .invoke(
                Endpoint::VALIDATE_LOCATION,
                &json!({
                    "restaurant_id": restaurant,
                    "user_latitude": position.latitude,
                    "user_longitude": position.longitude,
                }),
            )
            .await?;
        if reply.is_within_range {
            Ok(LocationCheck::Verified)
        } else {
            Ok(LocationCheck::OutOfRange(reply.message.unwrap_or_else(|| {
                "You are not at the restaurant location.".to_string()
            })))
        }
    }

    /// Submit every recorded answer and return the server's confirmation text.
    ///
    /// Completion is not enforced here; hosts gate the submit button with
    /// [`AuditChecklist::can_submit`].
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Encode` if the answers cannot be serialised and
    /// `ServiceError::Rpc` if the call fails.
    pub async fn submit_audit(
        &self,
        restaurant: &RestaurantId,
        checklist: &AuditChecklist,
        overall_comment: &str,
    ) -> Result<String, ServiceError> {
        let answers =
            serde_json::to_string(&checklist.submission_rows()).map_err(ServiceError::Encode)?;
        let reply: MessageReply = self
            .rpc
            .invoke(
                Endpoint::SUBMIT_AUDIT,
                &SubmitPayload {
                    restaurant_id: restaurant,
                    answers,
                    overall_comment: overall_comment.trim(),
                },
            )
            .await?;
        info!(restaurant = %restaurant, "audit submitted");
        Ok(reply
            .message
            .unwrap_or_else(|| "Audit submitted successfully".to_string()))
    }
}
