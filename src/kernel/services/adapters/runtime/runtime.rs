use super::message::AppMessage;
use crate::kernel::services::adapters::assistant::HttpAssistantClient;
use crate::kernel::services::adapters::import::import_directory;
use crate::kernel::services::ports::{ChatRequest, ImportSettings};
use crate::kernel::Effect;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::Sender;

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
    client: HttpAssistantClient,
    import: ImportSettings,
}

impl AsyncRuntime {
    pub fn new(
        tx: Sender<AppMessage>,
        client: HttpAssistantClient,
        import: ImportSettings,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self {
            runtime,
            tx,
            client,
            import,
        })
    }

    pub fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::SendChat(request) => self.send_chat(request),
            Effect::SyncAssistant => self.sync_assistant(),
            Effect::FetchStatus => self.fetch_status(),
            Effect::ImportDirectory(root) => self.import_dir(root),
        }
    }

    pub fn send_chat(&self, request: ChatRequest) {
        let tx = self.tx.clone();
        let client = self.client.clone();
        self.runtime.spawn(async move {
            let msg = match client.chat(&request).await {
                Ok(response) => AppMessage::ChatReplied(response),
                Err(e) => AppMessage::ChatFailed {
                    error: e.to_string(),
                },
            };
            let _ = tx.send(msg);
        });
    }

    pub fn sync_assistant(&self) {
        let tx = self.tx.clone();
        let client = self.client.clone();
        self.runtime.spawn(async move {
            let msg = match client.sync().await {
                Ok(response) => AppMessage::SyncFinished(response),
                Err(e) => AppMessage::SyncFailed {
                    error: e.to_string(),
                },
            };
            let _ = tx.send(msg);
        });
    }

    pub fn fetch_status(&self) {
        let tx = self.tx.clone();
        let client = self.client.clone();
        self.runtime.spawn(async move {
            let msg = match client.status().await {
                Ok(status) => AppMessage::StatusReceived(status),
                Err(e) => AppMessage::StatusFailed {
                    error: e.to_string(),
                },
            };
            let _ = tx.send(msg);
        });
    }

    pub fn import_dir(&self, root: PathBuf) {
        let tx = self.tx.clone();
        let settings = self.import.clone();
        self.runtime.spawn(async move {
            let root_for_walk = root.clone();
            let result =
                tokio::task::spawn_blocking(move || import_directory(&root_for_walk, &settings))
                    .await;

            let msg = match result {
                Ok(Ok(report)) => AppMessage::DirImported {
                    root,
                    vfs: report.vfs,
                    skipped: report.skipped,
                },
                Ok(Err(e)) => AppMessage::DirImportError {
                    root,
                    error: e.to_string(),
                },
                Err(e) => AppMessage::DirImportError {
                    root,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(msg);
        });
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/runtime.rs"]
mod tests;
