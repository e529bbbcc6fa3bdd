//! Reachability probe for the local gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::{ConnectionConfig, GATEWAY_PROBE_TIMEOUT};

#[async_trait]
pub(crate) trait GatewayProbe: Send + Sync {
    /// Resolves `true` when the gateway answers; every failure resolves `false`.
    async fn probe(&self, config: &ConnectionConfig) -> bool;
}

/// Any status below 500 means something is listening and serving HTTP,
/// even if it rejects `HEAD /` specifically.
pub(crate) fn is_reachable_status(status: StatusCode) -> bool {
    status.as_u16() < 500
}

pub(crate) struct HttpGatewayProbe {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpGatewayProbe {
    pub(crate) fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .unwrap_or_else(|error| {
                log::warn!("failed to build gateway probe client, using defaults: {error}");
                reqwest::Client::new()
            });
        Self { client, timeout }
    }
}

impl Default for HttpGatewayProbe {
    fn default() -> Self {
        Self::new(GATEWAY_PROBE_TIMEOUT)
    }
}

#[async_trait]
impl GatewayProbe for HttpGatewayProbe {
    async fn probe(&self, config: &ConnectionConfig) -> bool {
        let url = config.probe_url();
        let mut request = self.client.head(&url).timeout(self.timeout);
        if let Some(token) = config.bearer_token() {
            request = request.bearer_auth(token);
        }

        match request.send().await {
            Ok(response) => {
                let status = response.status();
                let reachable = is_reachable_status(status);
                log::debug!("gateway probe {url} -> {status} (reachable={reachable})");
                reachable
            }
            Err(error) => {
                log::debug!("gateway probe {url} failed: {error}");
                false
            }
        }
    }
}
