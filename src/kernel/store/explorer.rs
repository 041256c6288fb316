use crate::kernel::Action;

use super::DispatchResult;

impl super::Store {
    pub(super) fn reduce_explorer_action(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::OpenFile(path) => DispatchResult::changed(self.state.open_file(path)),
            Action::CloseTab(path) => DispatchResult::changed(self.state.close_tab(path)),
            Action::EditActive(content) => DispatchResult::changed(self.state.edit_active(content)),
            Action::ApplyToActive(code) => match self.state.apply_to_active(code) {
                Ok(()) => DispatchResult::changed(true),
                Err(e) => {
                    tracing::debug!(error = %e, "apply skipped");
                    DispatchResult::changed(false)
                }
            },
            Action::RevertActive => DispatchResult::changed(self.state.revert_active()),
            Action::RenamePath { path, new_name } => {
                match self.state.rename_node(&path, &new_name) {
                    Ok(_) => DispatchResult::changed(true),
                    Err(e) => {
                        tracing::warn!(path = %path, new_name = %new_name, error = %e, "rename failed");
                        DispatchResult::changed(false)
                    }
                }
            }
            Action::DeletePath(path) => DispatchResult::changed(self.state.delete_node(path)),
            Action::NewFile { parent, name } => {
                match self.state.new_file(parent.as_ref(), &name) {
                    Ok(path) => {
                        tracing::debug!(path = %path, "file created");
                        DispatchResult::changed(true)
                    }
                    Err(e) => {
                        tracing::warn!(name = %name, error = %e, "create failed");
                        DispatchResult::changed(false)
                    }
                }
            }
            Action::SetContextFile(path) => {
                DispatchResult::changed(self.state.set_context_file(path))
            }
            _ => DispatchResult::changed(false),
        }
    }
}
