use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub assistant: AssistantSettings,
    #[serde(default)]
    pub import: ImportSettings,
    #[serde(default = "default_true")]
    pub starter_project: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_status_poll_secs")]
    pub status_poll_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSettings {
    /// Files above this size are skipped.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
    #[serde(default)]
    pub include_hidden: bool,
}

fn default_true() -> bool {
    true
}

fn default_endpoint() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_status_poll_secs() -> u64 {
    5
}

fn default_max_file_bytes() -> u64 {
    2 * 1024 * 1024
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
            status_poll_secs: default_status_poll_secs(),
        }
    }
}

impl AssistantSettings {
    /// Delay between `/status` polls, never shorter than one second.
    pub fn status_poll_interval(&self) -> Duration {
        Duration::from_secs(self.status_poll_secs.max(1))
    }
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            respect_gitignore: true,
            include_hidden: false,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assistant: AssistantSettings::default(),
            import: ImportSettings::default(),
            starter_project: true,
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
