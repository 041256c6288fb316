//! HTTP client for the remote assistant service.

use crate::kernel::services::ports::{
    AssistantSettings, AssistantStatus, ChatRequest, ChatResponse, SyncResponse,
};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

const CHAT_ROUTE: &str = "chat";
const STATUS_ROUTE: &str = "status";
const SYNC_ROUTE: &str = "ai/sync";

#[derive(Debug)]
pub enum AssistantError {
    Http(reqwest::Error),
    Status(u16),
}

impl fmt::Display for AssistantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssistantError::Http(e) => write!(f, "assistant request failed: {}", e),
            AssistantError::Status(code) => write!(f, "assistant returned HTTP {}", code),
        }
    }
}

impl std::error::Error for AssistantError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssistantError::Http(e) => Some(e),
            AssistantError::Status(_) => None,
        }
    }
}

impl From<reqwest::Error> for AssistantError {
    fn from(e: reqwest::Error) -> Self {
        AssistantError::Http(e)
    }
}

#[derive(Clone)]
pub struct HttpAssistantClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAssistantClient {
    pub fn new(settings: &AssistantSettings) -> Result<Self, AssistantError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AssistantError> {
        let url = endpoint_url(&self.endpoint, CHAT_ROUTE);
        tracing::debug!(url = %url, context = %request.context.path, "chat request");
        let resp = self.client.post(url).json(request).send().await?;
        decode(resp).await
    }

    pub async fn status(&self) -> Result<AssistantStatus, AssistantError> {
        let url = endpoint_url(&self.endpoint, STATUS_ROUTE);
        let resp = self.client.get(url).send().await?;
        decode(resp).await
    }

    pub async fn sync(&self) -> Result<SyncResponse, AssistantError> {
        let url = endpoint_url(&self.endpoint, SYNC_ROUTE);
        tracing::debug!(url = %url, "sync request");
        let resp = self.client.post(url).send().await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, AssistantError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(AssistantError::Status(status.as_u16()));
    }
    Ok(resp.json::<T>().await?)
}

/// Joins `route` onto `endpoint` with exactly one `/` between them.
pub fn endpoint_url(endpoint: &str, route: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        route.trim_start_matches('/')
    )
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/assistant.rs"]
mod tests;
