//! Tree projection of the virtual namespace.

use super::vfs_path::VfsPath;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeNodeKind {
    File,
    Folder,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    pub path: VfsPath,
    pub kind: TreeNodeKind,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn root() -> Self {
        Self {
            name: "root".to_string(),
            path: VfsPath::root(),
            kind: TreeNodeKind::Folder,
            children: Vec::new(),
        }
    }

    /// Walks `path` from this node, reusing children by name and appending
    /// missing ones. Intermediate nodes are folders; the last one gets `kind`.
    pub fn insert_path(&mut self, path: &VfsPath, kind: TreeNodeKind) {
        let segments = path.segments();
        let mut current = self;
        for (i, segment) in segments.iter().enumerate() {
            let idx = match current.children.iter().position(|c| &c.name == segment) {
                Some(idx) => idx,
                None => {
                    let child_kind = if i + 1 == segments.len() {
                        kind
                    } else {
                        TreeNodeKind::Folder
                    };
                    current.children.push(TreeNode {
                        name: segment.clone(),
                        path: current.path.join(segment),
                        kind: child_kind,
                        children: Vec::new(),
                    });
                    current.children.len() - 1
                }
            };
            current = &mut current.children[idx];
        }
    }

    pub fn find(&self, path: &VfsPath) -> Option<&TreeNode> {
        let mut current = self;
        for segment in path.segments() {
            current = current.children.iter().find(|c| &c.name == segment)?;
        }
        Some(current)
    }

    /// Pre-order rows for list rendering. The node itself is skipped and its
    /// children sit at depth 0.
    pub fn flatten(&self, selected: Option<&VfsPath>) -> Vec<TreeRow> {
        let mut result = Vec::new();
        let mut stack: Vec<(&TreeNode, u16)> =
            self.children.iter().rev().map(|c| (c, 0)).collect();

        while let Some((node, depth)) = stack.pop() {
            result.push(TreeRow {
                depth,
                name: node.name.clone(),
                path: node.path.clone(),
                kind: node.kind,
                selected: selected == Some(&node.path),
            });
            for child in node.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }

        result
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRow {
    pub depth: u16,
    pub name: String,
    pub path: VfsPath,
    pub kind: TreeNodeKind,
    pub selected: bool,
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_tree.rs"]
mod tests;
