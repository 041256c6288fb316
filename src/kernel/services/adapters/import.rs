//! Local directory import.
//!
//! The walk builds a brand-new namespace; callers swap it in with
//! `WorkbenchState::replace_namespace` once it is complete.

use crate::kernel::services::ports::ImportSettings;
use crate::models::{FileHandle, VfsPath, VirtualFileSystem};
use ignore::WalkBuilder;
use std::io;
use std::path::Path;

pub struct ImportReport {
    pub vfs: VirtualFileSystem,
    /// Entries left out: oversized or non-UTF-8 files, links, special files
    /// and unreadable entries.
    pub skipped: usize,
}

/// OS and tooling clutter that never belongs in the namespace.
pub fn should_ignore(name: &str) -> bool {
    matches!(
        name,
        ".DS_Store"
            | ".Spotlight-V100"
            | ".Trashes"
            | ".fseventsd"
            | ".TemporaryItems"
            | "Thumbs.db"
            | "desktop.ini"
            | ".git"
            | ".claude"
            | "node_modules"
    )
}

pub fn import_directory(root: &Path, settings: &ImportSettings) -> io::Result<ImportReport> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("{} is not a directory", root.display()),
        ));
    }

    let walker = WalkBuilder::new(root)
        .hidden(!settings.include_hidden)
        .ignore(settings.respect_gitignore)
        .git_ignore(settings.respect_gitignore)
        .git_global(settings.respect_gitignore)
        .git_exclude(settings.respect_gitignore)
        .require_git(false)
        .parents(false)
        .filter_entry(|entry| !should_ignore(&entry.file_name().to_string_lossy()))
        .build();

    let mut vfs = VirtualFileSystem::new();
    let mut skipped = 0usize;

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "import walk error");
                skipped += 1;
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        let Some(path) = relative_vfs_path(root, entry.path()) else {
            tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 path");
            skipped += 1;
            continue;
        };

        let Some(file_type) = entry.file_type() else {
            skipped += 1;
            continue;
        };
        if file_type.is_dir() {
            vfs.create_folder(path);
            continue;
        }
        // Links are not followed, so they cannot pull in files outside `root`.
        if !file_type.is_file() {
            tracing::debug!(path = %path, "skipping link or special file");
            skipped += 1;
            continue;
        }

        match read_text(entry.path(), settings.max_file_bytes) {
            Ok(Some(content)) => {
                vfs.write_file_with_handle(path, content, Some(FileHandle::new(entry.path())));
            }
            Ok(None) => {
                tracing::debug!(path = %path, "skipping binary or oversized file");
                skipped += 1;
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "failed to read file");
                skipped += 1;
            }
        }
    }

    tracing::debug!(
        root = %root.display(),
        files = vfs.file_count(),
        folders = vfs.folder_count(),
        skipped,
        "directory walked"
    );
    Ok(ImportReport { vfs, skipped })
}

fn relative_vfs_path(root: &Path, path: &Path) -> Option<VfsPath> {
    let relative = path.strip_prefix(root).ok()?;
    let mut out = VfsPath::root();
    for component in relative.components() {
        out = out.join(component.as_os_str().to_str()?);
    }
    (!out.is_root()).then_some(out)
}

/// `Ok(None)` for files that are too large or not valid UTF-8.
fn read_text(path: &Path, max_bytes: u64) -> io::Result<Option<String>> {
    if std::fs::metadata(path)?.len() > max_bytes {
        return Ok(None);
    }
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8(bytes).ok())
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/import.rs"]
mod tests;
