use crate::kernel::services::ports::{AssistantStatus, ChatResponse, SyncResponse};
use crate::kernel::Action;
use crate::models::VirtualFileSystem;
use std::path::PathBuf;

#[derive(Debug)]
pub enum AppMessage {
    ChatReplied(ChatResponse),
    ChatFailed {
        error: String,
    },
    SyncFinished(SyncResponse),
    SyncFailed {
        error: String,
    },
    StatusReceived(AssistantStatus),
    StatusFailed {
        error: String,
    },
    DirImported {
        root: PathBuf,
        vfs: VirtualFileSystem,
        skipped: usize,
    },
    DirImportError {
        root: PathBuf,
        error: String,
    },
}

impl From<AppMessage> for Action {
    fn from(msg: AppMessage) -> Self {
        match msg {
            AppMessage::ChatReplied(response) => Action::ChatReplied(response),
            AppMessage::ChatFailed { error } => Action::ChatFailed(error),
            AppMessage::SyncFinished(response) => Action::SyncFinished(response),
            AppMessage::SyncFailed { error } => Action::SyncFailed(error),
            AppMessage::StatusReceived(status) => Action::StatusReceived(status),
            AppMessage::StatusFailed { error } => Action::StatusFailed(error),
            AppMessage::DirImported { root, vfs, skipped } => {
                Action::ImportFinished { root, vfs, skipped }
            }
            AppMessage::DirImportError { root, error } => Action::ImportFailed { root, error },
        }
    }
}
