use std::path::PathBuf;

use crate::kernel::services::ports::{AssistantStatus, ChatResponse, SyncResponse};
use crate::models::{VfsPath, VirtualFileSystem};

#[derive(Debug, Clone)]
pub enum Action {
    OpenFile(VfsPath),
    CloseTab(VfsPath),
    EditActive(String),
    ApplyToActive(String),
    RevertActive,
    RenamePath {
        path: VfsPath,
        new_name: String,
    },
    DeletePath(VfsPath),
    NewFile {
        parent: Option<VfsPath>,
        name: String,
    },
    SetContextFile(Option<VfsPath>),
    SubmitChat(String),
    ChatReplied(ChatResponse),
    ChatFailed(String),
    RequestSync,
    SyncFinished(SyncResponse),
    SyncFailed(String),
    PollStatus,
    StatusReceived(AssistantStatus),
    StatusFailed(String),
    ImportDirectory(PathBuf),
    ImportFinished {
        root: PathBuf,
        vfs: VirtualFileSystem,
        skipped: usize,
    },
    ImportFailed {
        root: PathBuf,
        error: String,
    },
}
