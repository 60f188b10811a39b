use gitdeps_fs::NormalizedPath;
use gitdeps_meta::{Error, ManifestLoadError, ManifestRecord, ManifestStore};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn store_in(temp: &TempDir) -> ManifestStore {
    ManifestStore::new(NormalizedPath::new(temp.path().join("Packages/manifest.json")))
}

#[test]
fn test_load_missing_manifest() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    assert!(store.load().is_none());
    assert!(matches!(store.read(), Err(ManifestLoadError::NotFound(_))));
}

#[test]
fn test_load_manifest_without_dependencies() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    fs::create_dir_all(temp.path().join("Packages")).unwrap();
    fs::write(store.path().to_native(), r#"{"scopedRegistries": []}"#).unwrap();

    assert!(store.load().is_none());
}

#[test]
fn test_save_then_load_round_trip() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    let record = ManifestRecord::from_dependencies([
        ("com.example.core", "https://github.com/example/core.git#v2"),
        ("com.unity.ugui", "1.0.0"),
    ]);

    store.save(&record).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded.dependencies, record.dependencies);
}

#[test]
fn test_save_keeps_unrelated_keys() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    fs::create_dir_all(temp.path().join("Packages")).unwrap();
    fs::write(
        store.path().to_native(),
        r#"{"dependencies": {"a": "1.0"}, "testables": ["a"], "enableLockFile": true}"#,
    )
    .unwrap();

    let mut record = store.load().unwrap();
    record.dependencies.insert("b".into(), "git://b".into());
    store.save(&record).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path().to_native()).unwrap()).unwrap();
    assert_eq!(raw["testables"][0], "a");
    assert_eq!(raw["enableLockFile"], true);
    assert_eq!(raw["dependencies"]["b"], "git://b");
}

#[test]
fn test_save_failure_propagates() {
    let temp = TempDir::new().unwrap();
    // A regular file where the Packages directory should be.
    fs::write(temp.path().join("Packages"), "blocker").unwrap();
    let store = store_in(&temp);

    let err = store
        .save(&ManifestRecord::from_dependencies([("a", "1.0")]))
        .unwrap_err();
    assert!(matches!(err, Error::Fs(_)));
}
