use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::LegacyConfig;

/// The subset of candidate data mirrored to the legacy system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCandidate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Outbound boundary towards the legacy system. Implementations report
/// failures honestly; it is the caller's job to decide that the failure
/// does not matter. That split lets tests assert a notification was
/// attempted without coupling to its outcome.
#[async_trait]
pub trait LegacyNotifier: Send + Sync {
    async fn notify(&self, candidate: LegacyCandidate) -> Result<(), NotifyError>;
}

/// Notification transport failure.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("legacy system unreachable: {0}")]
    Transport(String),
    #[error("legacy system rejected the payload: {0}")]
    Rejected(String),
}

/// Notifier POSTing to the legacy HTTP endpoint with a static API key.
/// The client carries a request timeout so a stalled legacy system cannot
/// hold up candidate creation indefinitely.
pub struct HttpLegacyNotifier {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl HttpLegacyNotifier {
    pub fn from_config(config: &LegacyConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| NotifyError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl LegacyNotifier for HttpLegacyNotifier {
    async fn notify(&self, candidate: LegacyCandidate) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .json(&candidate)
            .send()
            .await
            .map_err(|err| NotifyError::Transport(err.to_string()))?;

        if let Err(err) = response.error_for_status() {
            return Err(NotifyError::Rejected(err.to_string()));
        }

        Ok(())
    }
}
