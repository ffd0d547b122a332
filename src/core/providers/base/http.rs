//! HTTP transport shared by all adapters
//!
//! One pooled `reqwest::Client` per process. Each call is additionally bounded
//! by `tokio::time::timeout`, so a stalled vendor surfaces as
//! [`ProviderError::Timeout`] rather than hanging the request.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::timeout;
use tracing::debug;

use crate::core::providers::unified_provider::ProviderError;

/// Connection pool settings
pub struct PoolConfig;

impl PoolConfig {
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    pub const POOL_SIZE: usize = 32;
    pub const KEEPALIVE_SECS: u64 = 90;
}

/// Pooled client plus the per-call deadline
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Build a transport whose calls give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(PoolConfig::CONNECT_TIMEOUT_SECS))
            .pool_idle_timeout(Duration::from_secs(PoolConfig::KEEPALIVE_SECS))
            .pool_max_idle_per_host(PoolConfig::POOL_SIZE)
            .build()
            .map_err(|e| {
                ProviderError::network("http", format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, timeout })
    }

    /// Wrap an existing client
    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST `body` and decode a 2xx response into the vendor envelope `T`
    ///
    /// Non-2xx statuses go through [`ProviderError::from_http_status`]; a 2xx
    /// body that does not match `T` is [`ProviderError::ResponseParsing`].
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        provider: &'static str,
        model: &str,
        builder: RequestBuilder,
        body: &Value,
    ) -> Result<T, ProviderError> {
        let response = timeout(self.timeout, builder.json(body).send())
            .await
            .map_err(|_| {
                ProviderError::timeout(
                    provider,
                    format!("no response within {}ms", self.timeout.as_millis()),
                )
            })?
            .map_err(|e| transport_error(provider, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(provider, e))?;

        debug!(
            provider = provider,
            model = model,
            status = status.as_u16(),
            bytes = text.len(),
            "provider response received"
        );

        if !status.is_success() {
            return Err(ProviderError::from_http_status(
                provider,
                status.as_u16(),
                model,
                &text,
            ));
        }

        serde_json::from_str::<T>(&text).map_err(|e| {
            ProviderError::response_parsing(provider, format!("unexpected response envelope: {}", e))
        })
    }
}

fn transport_error(provider: &'static str, error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::timeout(provider, error.to_string())
    } else {
        ProviderError::network(provider, error.to_string())
    }
}
