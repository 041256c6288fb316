//! Data model: paths, the virtual file system and its tree projection.

pub mod file_tree;
pub mod vfs;
pub mod vfs_path;

pub use file_tree::{TreeNode, TreeNodeKind, TreeRow};
pub use vfs::{FileEntry, FileHandle, VfsError, VirtualFileSystem};
pub use vfs_path::VfsPath;
