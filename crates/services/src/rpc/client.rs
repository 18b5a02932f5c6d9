use reqwest::Client;
use reqwest::header::COOKIE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::config::RpcConfig;
use super::endpoint::Endpoint;
use super::envelope;
use crate::error::RpcError;

/// Thin client for the backend's method endpoints.
#[derive(Clone, Debug)]
pub struct RpcClient {
    client: Client,
    config: RpcConfig,
}

impl RpcClient {
    /// Build a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::Http` if the HTTP client cannot be constructed.
    pub fn new(config: RpcConfig) -> Result<Self, RpcError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// POST `payload` as JSON to `endpoint` and decode the envelope into `T`.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::HttpStatus` for non-2xx answers, `RpcError::Http` when
    /// the request fails, `RpcError::Decode` for bodies that do not fit `T`, and
    /// `RpcError::Application` when the envelope is not successful.
    pub async fn invoke<P, T>(&self, endpoint: Endpoint, payload: &P) -> Result<T, RpcError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(%endpoint, "rpc call");
        let result = self.send(endpoint, payload).await;
        if let Err(err) = &result {
            warn!(%endpoint, error = %err, "rpc call failed");
        }
        result
    }

    /// `invoke` with an empty JSON object as the body.
    ///
    /// # Errors
    ///
    /// See [`RpcClient::invoke`].
    pub async fn call<T>(&self, endpoint: Endpoint) -> Result<T, RpcError>
    where
        T: DeserializeOwned,
    {
        self.invoke(endpoint, &serde_json::Map::new()).await
    }

    async fn send<P, T>(&self, endpoint: Endpoint, payload: &P) -> Result<T, RpcError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint_url(endpoint)?;

        let mut request = self.client.post(url).json(payload);
        if let Some(sid) = &self.config.session_id {
            request = request.header(COOKIE, format!("sid={sid}"));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(RpcError::HttpStatus(response.status()));
        }

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        let envelope = envelope::open(body)?;
        Ok(serde_json::from_value(envelope)?)
    }
}
