//! webcode - core of a browser-style editor shell
//!
//! Modules:
//! - models: VfsPath, VirtualFileSystem, TreeNode
//! - kernel: workbench state, Action/Effect and the Store
//! - kernel::services: ports (settings, assistant wire types) and adapters
//!   (import, HTTP, runtime)

pub mod kernel;
pub mod models;
