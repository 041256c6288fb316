//! Wire contract of the remote assistant service.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub context: ChatContext,
}

/// The file sent along with a chat message. Both fields are empty when no
/// context file is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatContext {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub message: String,
    /// Path to new content, applied to the namespace in key order.
    #[serde(default)]
    pub files: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl ChatResponse {
    pub const START_TRAINING: &'static str = "start_training";

    pub fn starts_training(&self) -> bool {
        self.action.as_deref() == Some(Self::START_TRAINING)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default)]
    pub sync_status: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: serde_json::Value,
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/assistant.rs"]
mod tests;
