use crate::kernel::services::ports::{ChatContext, ChatRequest};
use crate::kernel::{Action, ChatSender, Effect};

use super::DispatchResult;

impl super::Store {
    pub(super) fn reduce_chat_action(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::SubmitChat(raw) => {
                let message = raw.trim();
                if message.is_empty() {
                    return DispatchResult::changed(false);
                }
                self.state.push_message(ChatSender::User, message);

                let context = match self.state.context_file() {
                    Some(path) => ChatContext {
                        path: path.to_string(),
                        content: self.state.vfs().read_file(path).unwrap_or_default().to_string(),
                    },
                    None => ChatContext::default(),
                };
                self.state.pending_requests += 1;

                DispatchResult::effect(
                    Effect::SendChat(ChatRequest {
                        message: message.to_string(),
                        context,
                    }),
                    true,
                )
            }
            Action::ChatReplied(response) => {
                self.finish_request();
                if let Some(tokens) = response.tokens_used {
                    self.state.push_message(
                        ChatSender::Metric,
                        format!("Used {} tokens for this reasoning.", tokens),
                    );
                }
                if response.starts_training() {
                    self.state
                        .push_message(ChatSender::Assistant, "Initiating training protocol...");
                } else {
                    self.state.push_message(ChatSender::Assistant, response.message);
                    if !response.files.is_empty() {
                        let written = self.state.apply_assistant_files(&response.files);
                        tracing::info!(written, "applied assistant files");
                    }
                }
                DispatchResult::changed(true)
            }
            Action::ChatFailed(error) => {
                self.finish_request();
                tracing::warn!(error = %error, "chat request failed");
                self.state
                    .push_message(ChatSender::System, "Error: Backend unavailable.");
                DispatchResult::changed(true)
            }
            Action::RequestSync => {
                self.state.pending_requests += 1;
                DispatchResult::effect(Effect::SyncAssistant, true)
            }
            Action::SyncFinished(response) => {
                self.finish_request();
                self.state.push_message(
                    ChatSender::System,
                    format!("{} (Global Brain Updated)", response.message),
                );
                DispatchResult::changed(true)
            }
            Action::SyncFailed(error) => {
                self.finish_request();
                tracing::warn!(error = %error, "sync failed");
                self.state.push_message(
                    ChatSender::System,
                    "Sync Failed. Backend offline or git not configured.",
                );
                DispatchResult::changed(true)
            }
            Action::PollStatus => DispatchResult::effect(Effect::FetchStatus, false),
            Action::StatusReceived(status) => {
                let changed = self.state.assistant_status.as_ref() != Some(&status);
                self.state.assistant_status = Some(status);
                DispatchResult::changed(changed)
            }
            Action::StatusFailed(error) => {
                tracing::debug!(error = %error, "status poll failed");
                DispatchResult::changed(self.state.assistant_status.take().is_some())
            }
            _ => DispatchResult::changed(false),
        }
    }

    fn finish_request(&mut self) {
        self.state.pending_requests = self.state.pending_requests.saturating_sub(1);
    }
}
