use super::{Action, Effect, WorkbenchState};

mod chat;
mod explorer;

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }

    fn effect(effect: Effect, state_changed: bool) -> Self {
        Self {
            effects: vec![effect],
            state_changed,
        }
    }
}

pub struct Store {
    state: WorkbenchState,
}

impl Store {
    pub fn new(state: WorkbenchState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &WorkbenchState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::OpenFile(_)
            | Action::CloseTab(_)
            | Action::EditActive(_)
            | Action::ApplyToActive(_)
            | Action::RevertActive
            | Action::RenamePath { .. }
            | Action::DeletePath(_)
            | Action::NewFile { .. }
            | Action::SetContextFile(_) => self.reduce_explorer_action(action),
            Action::SubmitChat(_)
            | Action::ChatReplied(_)
            | Action::ChatFailed(_)
            | Action::RequestSync
            | Action::SyncFinished(_)
            | Action::SyncFailed(_)
            | Action::PollStatus
            | Action::StatusReceived(_)
            | Action::StatusFailed(_) => self.reduce_chat_action(action),
            Action::ImportDirectory(root) => {
                tracing::info!(root = %root.display(), "import requested");
                DispatchResult::effect(Effect::ImportDirectory(root), false)
            }
            Action::ImportFinished { root, vfs, skipped } => {
                tracing::info!(
                    root = %root.display(),
                    files = vfs.file_count(),
                    folders = vfs.folder_count(),
                    skipped,
                    "import finished"
                );
                self.state.replace_namespace(vfs);
                DispatchResult::changed(true)
            }
            Action::ImportFailed { root, error } => {
                tracing::warn!(root = %root.display(), error = %error, "import failed");
                self.state.push_message(
                    super::ChatSender::System,
                    format!("Failed to open folder: {}", error),
                );
                DispatchResult::changed(true)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
