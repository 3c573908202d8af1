//! NerdGraph GraphQL client
//!
//! The export pipeline only needs one operation from the remote API: run a
//! GraphQL query and hand back its `data`. [`GraphQlClient`] is that seam;
//! [`NerdGraphClient`] implements it over HTTPS with `reqwest`.

use super::models::{GraphQlRequest, GraphQlResponse};
use crate::config::NewRelicConfig;
use crate::domain::{ExporterError, RemoteQueryError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// A remote GraphQL endpoint
///
/// Implementations return the response `data` object, or a
/// [`RemoteQueryError`] on transport failure, non-success status, GraphQL
/// errors, or a malformed envelope. Implementations must not retry.
#[async_trait]
pub trait GraphQlClient: Send + Sync {
    async fn query(&self, query: &str, variables: Value) -> std::result::Result<Value, RemoteQueryError>;
}

/// Run `query` and decode its `data` into `T`
pub async fn query_as<T: DeserializeOwned>(
    client: &dyn GraphQlClient,
    query: &str,
    variables: Value,
) -> std::result::Result<T, RemoteQueryError> {
    let data = client.query(query, variables).await?;
    serde_json::from_value(data).map_err(|e| RemoteQueryError::InvalidResponse(e.to_string()))
}

/// HTTPS client for the New Relic NerdGraph API
pub struct NerdGraphClient {
    endpoint: String,
    client: Client,
    config: NewRelicConfig,
}

impl NerdGraphClient {
    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client can't be built.
    pub fn new(config: NewRelicConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .user_agent(concat!("tfsynth/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ExporterError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: config.endpoint(),
            client,
            config,
        })
    }

    /// GraphQL endpoint the client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GraphQlClient for NerdGraphClient {
    async fn query(&self, query: &str, variables: Value) -> std::result::Result<Value, RemoteQueryError> {
        tracing::debug!(endpoint = %self.endpoint, "Sending NerdGraph query");

        let response = self
            .client
            .post(&self.endpoint)
            .header("API-Key", self.config.api_key.expose_secret().as_ref())
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(|e| RemoteQueryError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteQueryError::HttpStatus {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| RemoteQueryError::InvalidResponse(e.to_string()))?;

        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            return Err(RemoteQueryError::GraphQl(
                errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        envelope
            .data
            .ok_or_else(|| RemoteQueryError::InvalidResponse("response has no data".to_string()))
    }
}
