//! Service ports: data contracts shared by the kernel and its adapters.

pub mod assistant;
pub mod settings;

pub use assistant::{AssistantStatus, ChatContext, ChatRequest, ChatResponse, SyncResponse};
pub use settings::{AssistantSettings, ImportSettings, Settings};
