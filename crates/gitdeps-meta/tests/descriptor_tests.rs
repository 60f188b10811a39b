use gitdeps_fs::NormalizedPath;
use gitdeps_meta::{DESCRIPTOR_FILENAME, PackageRecord};
use proptest::prelude::*;
use rstest::rstest;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

fn full_descriptor() -> Value {
    json!({
        "name": "com.example.tools",
        "version": "1.0.0",
        "displayName": "Example Tools",
        "description": "Tools",
        "keywords": ["a", "b"],
        "dependencies": {"com.unity.ugui": "1.0.0"},
        "gitDependencies": {"com.example.core": "git://core"}
    })
}

fn write_package(dir: &std::path::Path, descriptor: &str) -> NormalizedPath {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(DESCRIPTOR_FILENAME), descriptor).unwrap();
    NormalizedPath::new(dir)
}

#[rstest]
#[case("name")]
#[case("version")]
#[case("displayName")]
fn test_missing_required_field_yields_no_record(#[case] field: &str) {
    let temp = TempDir::new().unwrap();
    let mut descriptor = full_descriptor();
    descriptor.as_object_mut().unwrap().remove(field);

    let dir = write_package(&temp.path().join("pkg"), &descriptor.to_string());

    assert_eq!(PackageRecord::from_directory(&dir), None);
}

#[rstest]
#[case::empty_file("")]
#[case::truncated("{\"name\": \"a\"")]
#[case::array("[]")]
#[case::string("\"package\"")]
#[case::bad_keywords(r#"{"name": "a", "version": "1", "displayName": "A", "keywords": {"x": 1}}"#)]
#[case::bad_dependencies(r#"{"name": "a", "version": "1", "displayName": "A", "dependencies": "x"}"#)]
fn test_malformed_descriptor_yields_no_record(#[case] content: &str) {
    let temp = TempDir::new().unwrap();
    let dir = write_package(&temp.path().join("pkg"), content);

    assert_eq!(PackageRecord::from_directory(&dir), None);
}

#[test]
fn test_descriptor_that_is_a_directory_yields_no_record() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("pkg").join(DESCRIPTOR_FILENAME)).unwrap();

    let dir = NormalizedPath::new(temp.path().join("pkg"));
    assert_eq!(PackageRecord::from_directory(&dir), None);
}

#[test]
fn test_custom_descriptor_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("meta.json");
    fs::write(&path, full_descriptor().to_string()).unwrap();

    let record = PackageRecord::from_descriptor_path(&NormalizedPath::new(&path)).unwrap();
    assert_eq!(record.display_name, "Example Tools");
}

#[test]
fn test_record_serializes_with_descriptor_field_names() {
    let record = PackageRecord::from_value(&full_descriptor()).unwrap();
    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(value["displayName"], "Example Tools");
    assert_eq!(value["gitDependencies"]["com.example.core"], "git://core");
}

proptest! {
    // Any combination of optional fields is fine as long as the three
    // identity fields are present; removing any one of them always rejects.
    #[test]
    fn test_identity_fields_decide_validity(
        keep_name in any::<bool>(),
        keep_version in any::<bool>(),
        keep_display in any::<bool>(),
        keep_description in any::<bool>(),
        keep_git in any::<bool>(),
    ) {
        let mut descriptor = full_descriptor();
        let object = descriptor.as_object_mut().unwrap();
        for (keep, field) in [
            (keep_name, "name"),
            (keep_version, "version"),
            (keep_display, "displayName"),
            (keep_description, "description"),
            (keep_git, "gitDependencies"),
        ] {
            if !keep {
                object.remove(field);
            }
        }

        let parsed = PackageRecord::from_value(&descriptor);
        prop_assert_eq!(parsed.is_ok(), keep_name && keep_version && keep_display);
    }
}
