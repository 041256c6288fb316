//! In-memory virtual file system.
//!
//! Files and folders live in two ordered collections keyed by `VfsPath`.
//! The root `/` always exists and is never stored.

use super::file_tree::{TreeNode, TreeNodeKind};
use super::vfs_path::VfsPath;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Bound;
use std::path::{Path, PathBuf};

/// Link back to the on-disk file an entry was imported from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileHandle {
    origin: PathBuf,
}

impl FileHandle {
    pub fn new(origin: impl Into<PathBuf>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    pub content: String,
    pub handle: Option<FileHandle>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VfsError {
    NotFound(VfsPath),
    Conflict(VfsPath),
    InvalidTarget(VfsPath),
}

impl fmt::Display for VfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VfsError::NotFound(p) => write!(f, "not found: {}", p),
            VfsError::Conflict(p) => write!(f, "already exists: {}", p),
            VfsError::InvalidTarget(p) => {
                write!(f, "cannot move a folder into its own subtree: {}", p)
            }
        }
    }
}

impl std::error::Error for VfsError {}

#[derive(Clone, Debug, Default)]
pub struct VirtualFileSystem {
    files: BTreeMap<VfsPath, FileEntry>,
    folders: BTreeSet<VfsPath>,
}

impl VirtualFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists(&self, path: impl Into<VfsPath>) -> bool {
        let path = path.into();
        path.is_root() || self.files.contains_key(&path) || self.folders.contains(&path)
    }

    pub fn is_file(&self, path: impl Into<VfsPath>) -> bool {
        self.files.contains_key(&path.into())
    }

    pub fn is_folder(&self, path: impl Into<VfsPath>) -> bool {
        let path = path.into();
        path.is_root() || self.folders.contains(&path)
    }

    /// Upserts a file and registers its ancestor folders.
    ///
    /// Last write wins. Nothing stops this from shadowing a folder or
    /// nesting under a file; use [`Self::try_write_file`] when that matters.
    pub fn write_file(&mut self, path: impl Into<VfsPath>, content: impl Into<String>) {
        self.write_file_with_handle(path, content, None);
    }

    pub fn write_file_with_handle(
        &mut self,
        path: impl Into<VfsPath>,
        content: impl Into<String>,
        handle: Option<FileHandle>,
    ) {
        let path = path.into();
        if path.is_root() {
            tracing::debug!("ignoring write to the root path");
            return;
        }
        self.register_ancestors(&path);
        self.files.insert(
            path,
            FileEntry {
                content: content.into(),
                handle,
            },
        );
    }

    /// Like [`Self::write_file`], but refuses to turn a folder into a file or
    /// to place a file below another file.
    pub fn try_write_file(
        &mut self,
        path: impl Into<VfsPath>,
        content: impl Into<String>,
    ) -> Result<(), VfsError> {
        let path = path.into();
        if self.is_folder(&path) {
            return Err(VfsError::Conflict(path));
        }
        if let Some(blocker) = path.ancestors().find(|a| self.files.contains_key(a)) {
            return Err(VfsError::Conflict(blocker));
        }
        self.write_file(path, content);
        Ok(())
    }

    pub fn create_folder(&mut self, path: impl Into<VfsPath>) {
        let path = path.into();
        if path.is_root() {
            return;
        }
        self.register_ancestors(&path);
        self.folders.insert(path);
    }

    pub fn read_file(&self, path: impl Into<VfsPath>) -> Option<&str> {
        self.files.get(&path.into()).map(|f| f.content.as_str())
    }

    pub fn handle(&self, path: impl Into<VfsPath>) -> Option<&FileHandle> {
        self.files.get(&path.into()).and_then(|f| f.handle.as_ref())
    }

    /// Moves a file, or a folder together with everything below it.
    ///
    /// Every check runs before the first mutation, so a failed rename leaves
    /// the namespace untouched.
    pub fn rename_path(
        &mut self,
        old_path: impl Into<VfsPath>,
        new_path: impl Into<VfsPath>,
    ) -> Result<(), VfsError> {
        let old_path = old_path.into();
        let new_path = new_path.into();

        if old_path.is_root() || !self.exists(&old_path) {
            return Err(VfsError::NotFound(old_path));
        }
        if self.exists(&new_path) {
            return Err(VfsError::Conflict(new_path));
        }
        if new_path.is_descendant_of(&old_path) {
            return Err(VfsError::InvalidTarget(new_path));
        }

        if let Some(entry) = self.files.remove(&old_path) {
            self.register_ancestors(&new_path);
            self.files.insert(new_path, entry);
            return Ok(());
        }

        self.folders.remove(&old_path);
        for folder in self.folder_descendants(&old_path) {
            self.folders.remove(&folder);
            if let Some(moved) = folder.rebase(&old_path, &new_path) {
                self.folders.insert(moved);
            }
        }
        for file in self.file_descendants(&old_path) {
            if let Some(entry) = self.files.remove(&file) {
                if let Some(moved) = file.rebase(&old_path, &new_path) {
                    self.files.insert(moved, entry);
                }
            }
        }
        self.register_ancestors(&new_path);
        self.folders.insert(new_path);
        Ok(())
    }

    /// Removes a file, or a folder and everything below it. Missing paths
    /// and the root are ignored.
    pub fn delete_path(&mut self, path: impl Into<VfsPath>) {
        let path = path.into();
        if path.is_root() {
            return;
        }
        self.files.remove(&path);
        if self.folders.remove(&path) {
            for folder in self.folder_descendants(&path) {
                self.folders.remove(&folder);
            }
            for file in self.file_descendants(&path) {
                self.files.remove(&file);
            }
        }
    }

    pub fn files(&self) -> impl Iterator<Item = (&VfsPath, &FileEntry)> {
        self.files.iter()
    }

    pub fn folders(&self) -> impl Iterator<Item = &VfsPath> {
        self.folders.iter()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }

    /// Builds a fresh hierarchical projection of the namespace.
    ///
    /// Folders go in before files so a shared parent resolves to one node.
    pub fn get_tree(&self) -> TreeNode {
        let mut root = TreeNode::root();
        for folder in &self.folders {
            root.insert_path(folder, TreeNodeKind::Folder);
        }
        for file in self.files.keys() {
            root.insert_path(file, TreeNodeKind::File);
        }
        root
    }

    fn register_ancestors(&mut self, path: &VfsPath) {
        for ancestor in path.ancestors() {
            if !self.folders.contains(&ancestor) {
                self.folders.insert(ancestor);
            }
        }
    }

    // Descendants of a path form one contiguous run right after it in
    // segment order.
    fn folder_descendants(&self, path: &VfsPath) -> Vec<VfsPath> {
        self.folders
            .range::<VfsPath, _>((Bound::Excluded(path), Bound::Unbounded))
            .take_while(|p| p.is_descendant_of(path))
            .cloned()
            .collect()
    }

    fn file_descendants(&self, path: &VfsPath) -> Vec<VfsPath> {
        self.files
            .range::<VfsPath, _>((Bound::Excluded(path), Bound::Unbounded))
            .map(|(p, _)| p)
            .take_while(|p| p.is_descendant_of(path))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/vfs.rs"]
mod tests;
