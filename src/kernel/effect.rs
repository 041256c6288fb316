use std::path::PathBuf;

use crate::kernel::services::ports::ChatRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SendChat(ChatRequest),
    SyncAssistant,
    FetchStatus,
    ImportDirectory(PathBuf),
}
