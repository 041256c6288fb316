use super::*;

fn paths(fs: &VirtualFileSystem) -> Vec<String> {
    let mut all: Vec<String> = fs
        .folders()
        .map(|p| p.to_string())
        .chain(fs.files().map(|(p, _)| p.to_string()))
        .collect();
    all.sort();
    all
}

#[test]
fn test_root_always_exists() {
    let fs = VirtualFileSystem::new();
    assert!(fs.exists("/"));
    assert!(fs.is_folder("/"));
    assert!(fs.is_empty());
    assert_eq!(fs.read_file("/"), None);
}

#[test]
fn test_write_and_read() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/a.txt", "first");
    fs.write_file("/a.txt", "second");
    assert!(fs.exists("/a.txt"));
    assert_eq!(fs.read_file("/a.txt"), Some("second"));
}

#[test]
fn test_empty_content_round_trips() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/empty.txt", "");
    assert_eq!(fs.read_file("/empty.txt"), Some(""));
}

#[test]
fn test_write_registers_ancestor_folders() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/a/b/c.txt", "data");
    assert!(fs.is_folder("/a"));
    assert!(fs.is_folder("/a/b"));
    assert!(!fs.is_file("/a/b"));
    assert_eq!(fs.folder_count(), 2);
    assert_eq!(fs.file_count(), 1);
}

#[test]
fn test_folders_are_not_readable() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/dir/f.txt", "x");
    assert_eq!(fs.read_file("/dir"), None);
    assert_eq!(fs.read_file("/missing.txt"), None);
}

#[test]
fn test_write_keeps_handle() {
    let mut fs = VirtualFileSystem::new();
    let handle = FileHandle::new("/tmp/project/a.txt");
    fs.write_file_with_handle("/a.txt", "a", Some(handle.clone()));
    assert_eq!(fs.handle("/a.txt"), Some(&handle));

    fs.write_file("/a.txt", "edited");
    assert_eq!(fs.handle("/a.txt"), None);
}

#[test]
fn test_root_write_is_ignored() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/", "nope");
    assert!(fs.is_empty());
}

#[test]
fn test_try_write_rejects_file_parent() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/a", "file");
    let err = fs.try_write_file("/a/b", "x").unwrap_err();
    assert_eq!(err, VfsError::Conflict(VfsPath::parse("/a")));
    assert!(!fs.exists("/a/b"));
}

#[test]
fn test_try_write_rejects_folder_target() {
    let mut fs = VirtualFileSystem::new();
    fs.create_folder("/dir");
    assert!(matches!(
        fs.try_write_file("/dir", "x"),
        Err(VfsError::Conflict(_))
    ));
    assert!(fs.try_write_file("/dir/ok.txt", "x").is_ok());
    assert_eq!(fs.read_file("/dir/ok.txt"), Some("x"));
}

#[test]
fn test_rename_file() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/old.txt", "content");
    fs.rename_path("/old.txt", "/new.txt").unwrap();
    assert_eq!(fs.read_file("/new.txt"), Some("content"));
    assert!(!fs.exists("/old.txt"));
}

#[test]
fn test_rename_folder_cascades() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/src/a.js", "a");
    fs.write_file("/src/sub/b.js", "b");

    fs.rename_path("/src", "/lib").unwrap();

    assert_eq!(paths(&fs), vec!["/lib", "/lib/a.js", "/lib/sub", "/lib/sub/b.js"]);
    assert_eq!(fs.read_file("/lib/sub/b.js"), Some("b"));
}

#[test]
fn test_rename_missing_source_fails_without_mutation() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/a.txt", "a");
    let before = paths(&fs);

    let err = fs.rename_path("/nope", "/other").unwrap_err();
    assert_eq!(err, VfsError::NotFound(VfsPath::parse("/nope")));
    assert_eq!(paths(&fs), before);
}

#[test]
fn test_rename_onto_existing_fails_without_mutation() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/src/a.js", "a");
    fs.write_file("/lib/b.js", "b");
    let before = paths(&fs);

    assert!(matches!(
        fs.rename_path("/src", "/lib"),
        Err(VfsError::Conflict(_))
    ));
    assert!(matches!(
        fs.rename_path("/src/a.js", "/lib/b.js"),
        Err(VfsError::Conflict(_))
    ));
    assert_eq!(paths(&fs), before);
    assert_eq!(fs.read_file("/lib/b.js"), Some("b"));
}

#[test]
fn test_rename_into_own_subtree_fails() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/a/x.txt", "x");
    let before = paths(&fs);

    assert!(matches!(
        fs.rename_path("/a", "/a/b"),
        Err(VfsError::InvalidTarget(_))
    ));
    assert_eq!(paths(&fs), before);
}

#[test]
fn test_rename_root_fails() {
    let mut fs = VirtualFileSystem::new();
    assert!(matches!(
        fs.rename_path("/", "/elsewhere"),
        Err(VfsError::NotFound(_))
    ));
    assert!(!fs.exists("/elsewhere"));
}

#[test]
fn test_rename_leaves_similarly_named_sibling() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/src/a.js", "a");
    fs.write_file("/src-old/a.js", "old");
    fs.write_file("/src2/a.js", "two");

    fs.rename_path("/src", "/lib").unwrap();

    assert_eq!(fs.read_file("/src-old/a.js"), Some("old"));
    assert_eq!(fs.read_file("/src2/a.js"), Some("two"));
    assert!(fs.exists("/lib/a.js"));
}

#[test]
fn test_rename_registers_new_ancestors() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/a.txt", "a");
    fs.rename_path("/a.txt", "/deep/nested/a.txt").unwrap();
    assert!(fs.is_folder("/deep"));
    assert!(fs.is_folder("/deep/nested"));
}

#[test]
fn test_delete_folder_cascades() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/src/a.js", "a");
    fs.write_file("/src/sub/b.js", "b");
    fs.write_file("/src-old/c.js", "c");

    fs.delete_path("/src");

    assert!(!fs.exists("/src"));
    assert!(!fs.exists("/src/a.js"));
    assert!(!fs.exists("/src/sub"));
    assert!(!fs.exists("/src/sub/b.js"));
    assert!(fs.exists("/src-old/c.js"));
}

#[test]
fn test_delete_file_keeps_parent() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/dir/a.txt", "a");
    fs.delete_path("/dir/a.txt");
    assert!(!fs.exists("/dir/a.txt"));
    assert!(fs.is_folder("/dir"));
}

#[test]
fn test_delete_missing_is_noop() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/a.txt", "a");
    let before = paths(&fs);
    fs.delete_path("/nonexistent");
    fs.delete_path("/");
    assert_eq!(paths(&fs), before);
}

#[test]
fn test_get_tree_orders_folders_before_files() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/a.txt", "a");
    fs.write_file("/dir/b.txt", "b");

    let tree = fs.get_tree();
    assert_eq!(tree.name, "root");
    assert!(tree.path.is_root());
    assert_eq!(tree.children.len(), 2);

    let dir = &tree.children[0];
    assert_eq!(dir.name, "dir");
    assert_eq!(dir.kind, TreeNodeKind::Folder);
    assert_eq!(dir.path.to_string(), "/dir");
    assert_eq!(dir.children.len(), 1);
    assert_eq!(dir.children[0].path.to_string(), "/dir/b.txt");
    assert_eq!(dir.children[0].kind, TreeNodeKind::File);

    let file = &tree.children[1];
    assert_eq!(file.name, "a.txt");
    assert_eq!(file.kind, TreeNodeKind::File);
    assert_eq!(file.path.to_string(), "/a.txt");
}

#[test]
fn test_get_tree_tracks_mutations() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/src/a.js", "a");
    fs.rename_path("/src", "/lib").unwrap();

    let tree = fs.get_tree();
    assert!(tree.find(&VfsPath::parse("/lib/a.js")).is_some());
    assert!(tree.find(&VfsPath::parse("/src")).is_none());

    fs.delete_path("/lib");
    assert!(fs.get_tree().children.is_empty());
}

#[test]
fn test_independent_instances() {
    let mut one = VirtualFileSystem::new();
    let two = VirtualFileSystem::new();
    one.write_file("/a.txt", "a");
    assert!(!two.exists("/a.txt"));
}

#[test]
fn test_parent_reference_write_reads_back() {
    let mut fs = VirtualFileSystem::new();
    fs.write_file("/a/..", "data");

    assert!(fs.is_file("/a/.."));
    assert_eq!(fs.read_file("/a/.."), Some("data"));
    assert!(fs.is_folder("/a"));
    assert!(!fs.is_file("/"));
}
