use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::info;

use audit_core::model::{DailyAuditSession, DailyTemplate, TemplateName};
use storage::repository::SessionStateRepository;

use crate::error::ServiceError;
use crate::rpc::{Endpoint, RpcClient};

#[derive(Deserialize)]
struct TemplatesReply {
    #[serde(default)]
    templates: Vec<DailyTemplate>,
}

/// Daily opening audits: the template list and starting one.
#[derive(Clone)]
pub struct DailyAuditService {
    rpc: RpcClient,
    session: Arc<dyn SessionStateRepository>,
}

impl DailyAuditService {
    #[must_use]
    pub fn new(rpc: RpcClient, session: Arc<dyn SessionStateRepository>) -> Self {
        Self { rpc, session }
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Rpc` if the call fails.
    pub async fn templates(&self) -> Result<Vec<DailyTemplate>, ServiceError> {
        let reply: TemplatesReply = self.rpc.call(Endpoint::GET_DAILY_TEMPLATES).await?;
        Ok(reply.templates)
    }

    /// Check the template may be started now, start it and keep the payload for the audit form.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Rpc` carrying the server's reason when the audit
    /// cannot start, and `ServiceError::Storage` if the payload cannot be kept.
    pub async fn start(&self, template: &TemplateName) -> Result<DailyAuditSession, ServiceError> {
        let payload = json!({ "template_name": template });
        let _: serde_json::Value = self
            .rpc
            .invoke(Endpoint::CAN_START_DAILY_AUDIT, &payload)
            .await?;
        let mut session: DailyAuditSession = self
            .rpc
            .invoke(Endpoint::START_DAILY_AUDIT, &payload)
            .await?;
        session.is_daily_audit = true;
        self.session.set_daily_audit(&session).await?;
        info!(
            template = %template,
            questions = session.questions_count(),
            "daily audit started"
        );
        Ok(session)
    }

    /// The daily audit started in this session, if any.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the stored payload cannot be read.
    pub async fn current(&self) -> Result<Option<DailyAuditSession>, ServiceError> {
        Ok(self.session.daily_audit().await?)
    }
}
