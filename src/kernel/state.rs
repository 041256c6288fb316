use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fmt;

use crate::kernel::language::LanguageId;
use crate::kernel::services::ports::AssistantStatus;
use crate::models::{TreeNode, TreeRow, VfsError, VfsPath, VirtualFileSystem};

pub const INDEX_PAGE: &str = "/index.html";

const STARTER_FILES: [(&str, &str); 3] = [
    (
        "/index.html",
        "<!DOCTYPE html>\n<html>\n<head>\n  <link rel=\"stylesheet\" href=\"style.css\">\n</head>\n<body>\n  <div id=\"app\">\n    <h1>Ready</h1>\n    <p>How can I help you today?</p>\n  </div>\n  <script src=\"script.js\"></script>\n</body>\n</html>",
    ),
    (
        "/style.css",
        "body {\n  font-family: Inter, sans-serif;\n  background: #121212;\n  color: #e0e0e0;\n  padding: 20px;\n}\nh1 { color: #aaddff; }",
    ),
    ("/script.js", "console.log(\"environment initialized.\");"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkbenchError {
    NoActiveFile,
    InvalidName(String),
    Vfs(VfsError),
}

impl fmt::Display for WorkbenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkbenchError::NoActiveFile => write!(f, "no file is open"),
            WorkbenchError::InvalidName(name) => write!(f, "invalid name: {:?}", name),
            WorkbenchError::Vfs(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for WorkbenchError {}

impl From<VfsError> for WorkbenchError {
    fn from(e: VfsError) -> Self {
        WorkbenchError::Vfs(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatSender {
    User,
    Assistant,
    System,
    /// Token usage and similar bookkeeping lines.
    Metric,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub text: String,
}

/// One editing session: the namespace plus everything the UI keeps around it.
#[derive(Debug, Default)]
pub struct WorkbenchState {
    vfs: VirtualFileSystem,
    open_tabs: Vec<VfsPath>,
    active: Option<VfsPath>,
    history: FxHashMap<VfsPath, Vec<String>>,
    context_file: Option<VfsPath>,
    transcript: Vec<ChatMessage>,
    pub assistant_status: Option<AssistantStatus>,
    pub pending_requests: usize,
}

impl WorkbenchState {
    pub fn new(vfs: VirtualFileSystem) -> Self {
        Self {
            vfs,
            ..Self::default()
        }
    }

    pub fn with_starter_project() -> Self {
        let mut vfs = VirtualFileSystem::new();
        for (path, content) in STARTER_FILES {
            vfs.write_file(path, content);
        }
        Self::new(vfs)
    }

    pub fn vfs(&self) -> &VirtualFileSystem {
        &self.vfs
    }

    pub fn open_tabs(&self) -> &[VfsPath] {
        &self.open_tabs
    }

    pub fn active(&self) -> Option<&VfsPath> {
        self.active.as_ref()
    }

    pub fn context_file(&self) -> Option<&VfsPath> {
        self.context_file.as_ref()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn push_message(&mut self, sender: ChatSender, text: impl Into<String>) {
        self.transcript.push(ChatMessage {
            sender,
            text: text.into(),
        });
    }

    pub fn tree(&self) -> TreeNode {
        self.vfs.get_tree()
    }

    pub fn explorer_rows(&self) -> Vec<TreeRow> {
        self.vfs.get_tree().flatten(self.active.as_ref())
    }

    pub fn open_file(&mut self, path: impl Into<VfsPath>) -> bool {
        let path = path.into();
        if !self.vfs.is_file(&path) {
            return false;
        }
        let mut changed = false;
        if !self.open_tabs.contains(&path) {
            self.open_tabs.push(path.clone());
            changed = true;
        }
        if self.active.as_ref() != Some(&path) {
            self.active = Some(path);
            changed = true;
        }
        changed
    }

    pub fn close_tab(&mut self, path: impl Into<VfsPath>) -> bool {
        let path = path.into();
        let Some(idx) = self.open_tabs.iter().position(|p| *p == path) else {
            return false;
        };
        self.open_tabs.remove(idx);
        if self.active.as_ref() == Some(&path) {
            self.active = self.open_tabs.last().cloned();
        }
        true
    }

    pub fn active_content(&self) -> Option<&str> {
        self.active.as_ref().and_then(|p| self.vfs.read_file(p))
    }

    pub fn active_language(&self) -> Option<LanguageId> {
        self.active.as_ref().map(LanguageId::from_path)
    }

    /// Editor buffer changed for the active file.
    pub fn edit_active(&mut self, content: String) -> bool {
        let Some(path) = self.active.clone() else {
            return false;
        };
        if self.vfs.read_file(&path) == Some(content.as_str()) {
            return false;
        }
        self.vfs.write_file(path, content);
        true
    }

    /// Replaces the active file, remembering the old content for
    /// [`Self::revert_active`].
    pub fn apply_to_active(&mut self, code: String) -> Result<(), WorkbenchError> {
        let path = self.active.clone().ok_or(WorkbenchError::NoActiveFile)?;
        let previous = self.vfs.read_file(&path).unwrap_or_default().to_string();
        self.history.entry(path.clone()).or_default().push(previous);
        self.vfs.write_file(path, code);
        Ok(())
    }

    pub fn can_revert(&self) -> bool {
        self.active
            .as_ref()
            .and_then(|p| self.history.get(p))
            .is_some_and(|stack| !stack.is_empty())
    }

    pub fn revert_active(&mut self) -> bool {
        let Some(path) = self.active.clone() else {
            return false;
        };
        let Some(previous) = self.history.get_mut(&path).and_then(Vec::pop) else {
            return false;
        };
        if self.history.get(&path).is_some_and(Vec::is_empty) {
            self.history.remove(&path);
        }
        self.vfs.write_file(path, previous);
        true
    }

    pub fn rename_node(
        &mut self,
        path: impl Into<VfsPath>,
        new_name: &str,
    ) -> Result<VfsPath, WorkbenchError> {
        let path = path.into();
        validate_name(new_name)?;
        let parent = path.parent().unwrap_or_default();
        let new_path = parent.join(new_name);

        self.vfs.rename_path(&path, &new_path)?;

        for tab in &mut self.open_tabs {
            if let Some(moved) = tab.rebase(&path, &new_path) {
                *tab = moved;
            }
        }
        if let Some(moved) = self.active.as_ref().and_then(|a| a.rebase(&path, &new_path)) {
            self.active = Some(moved);
        }
        if let Some(moved) = self
            .context_file
            .as_ref()
            .and_then(|c| c.rebase(&path, &new_path))
        {
            self.context_file = Some(moved);
        }
        let moved_history: Vec<VfsPath> = self
            .history
            .keys()
            .filter(|k| k.rebase(&path, &new_path).is_some())
            .cloned()
            .collect();
        for old in moved_history {
            if let (Some(stack), Some(moved)) =
                (self.history.remove(&old), old.rebase(&path, &new_path))
            {
                self.history.insert(moved, stack);
            }
        }

        tracing::debug!(from = %path, to = %new_path, "renamed");
        Ok(new_path)
    }

    pub fn delete_node(&mut self, path: impl Into<VfsPath>) -> bool {
        let path = path.into();
        if path.is_root() || !self.vfs.exists(&path) {
            return false;
        }
        self.vfs.delete_path(&path);

        let gone = |p: &VfsPath| *p == path || p.is_descendant_of(&path);
        self.open_tabs.retain(|p| !gone(p));
        self.history.retain(|p, _| !gone(p));
        if self.active.as_ref().is_some_and(gone) {
            self.active = self.open_tabs.last().cloned();
        }
        self.sync_context_file();
        true
    }

    /// Creates an empty file in `parent` (or in the root when `parent` is
    /// not a folder).
    pub fn new_file(
        &mut self,
        parent: Option<&VfsPath>,
        name: &str,
    ) -> Result<VfsPath, WorkbenchError> {
        validate_name(name)?;
        let base = match parent {
            Some(p) if self.vfs.is_folder(p) => p.clone(),
            _ => VfsPath::root(),
        };
        let path = base.join(name);
        if self.vfs.exists(&path) {
            return Err(VfsError::Conflict(path).into());
        }
        self.vfs.try_write_file(&path, "")?;
        Ok(path)
    }

    pub fn set_context_file(&mut self, path: Option<VfsPath>) -> bool {
        let path = path.filter(|p| self.vfs.is_file(p));
        if self.context_file == path {
            return false;
        }
        self.context_file = path;
        true
    }

    /// File paths sorted by their string form, the order of the context
    /// picker.
    pub fn context_candidates(&self) -> Vec<VfsPath> {
        let mut files: Vec<(String, VfsPath)> = self
            .vfs
            .files()
            .map(|(p, _)| (p.to_string(), p.clone()))
            .collect();
        files.sort_by(|a, b| a.0.cmp(&b.0));
        files.into_iter().map(|(_, p)| p).collect()
    }

    /// Installs a freshly imported namespace in one step.
    pub fn replace_namespace(&mut self, vfs: VirtualFileSystem) {
        self.vfs = vfs;
        let vfs = &self.vfs;
        self.open_tabs.retain(|p| vfs.is_file(p));
        self.history.retain(|p, _| vfs.is_file(p));
        if self.active.as_ref().is_some_and(|p| !vfs.is_file(p)) {
            self.active = None;
        }
        self.sync_context_file();

        let landing = if self.vfs.is_file(INDEX_PAGE) {
            Some(VfsPath::parse(INDEX_PAGE))
        } else {
            self.vfs.files().next().map(|(p, _)| p.clone())
        };
        if let Some(path) = landing {
            self.open_file(path);
        }
    }

    /// Writes every file of an assistant reply. Returns how many were written.
    pub fn apply_assistant_files(&mut self, files: &BTreeMap<String, String>) -> usize {
        let mut opens_index = false;
        let mut written = 0;
        for (raw, content) in files {
            let path = VfsPath::parse(raw);
            if path.is_root() {
                tracing::warn!(path = %raw, "assistant reply targets the root, skipped");
                continue;
            }
            opens_index |= path.to_string() == INDEX_PAGE;
            self.vfs.write_file(path, content.as_str());
            written += 1;
        }
        if opens_index {
            self.open_file(INDEX_PAGE);
        }
        written
    }

    fn sync_context_file(&mut self) {
        if self
            .context_file
            .as_ref()
            .is_some_and(|p| !self.vfs.is_file(p))
        {
            self.context_file = None;
        }
    }
}

fn validate_name(name: &str) -> Result<(), WorkbenchError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." || trimmed.contains('/') {
        return Err(WorkbenchError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
