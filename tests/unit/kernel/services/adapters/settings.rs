use super::*;
use tempfile::tempdir;

#[test]
fn settings_path_ends_with_app_file() {
    if let Some(path) = get_settings_path() {
        assert!(path.ends_with(".webcode/settings.json"));
    }
}

#[test]
fn default_settings_file_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join(SETTINGS_FILE);

    write_default_settings(&path).unwrap();
    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings.assistant.endpoint, "http://localhost:5000");
    assert!(settings.starter_project);
}

#[test]
fn existing_settings_are_not_overwritten() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(SETTINGS_FILE);
    std::fs::write(&path, r#"{"starter_project": false}"#).unwrap();

    write_default_settings(&path).unwrap();
    let settings = load_settings_from(&path).unwrap();
    assert!(!settings.starter_project);
    assert_eq!(settings.import.max_file_bytes, 2 * 1024 * 1024);
}

#[test]
fn malformed_or_missing_settings_yield_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(SETTINGS_FILE);
    assert!(load_settings_from(&path).is_none());

    std::fs::write(&path, "{ not json").unwrap();
    assert!(load_settings_from(&path).is_none());
}
