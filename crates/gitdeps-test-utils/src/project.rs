//! [`TestProject`] builder for resolver test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tempfile::TempDir;

/// Where installed packages live in a stock project.
pub const PACKAGE_CACHE: &str = "Library/PackageCache";
/// User-owned packages folder.
pub const LOCAL_PACKAGES: &str = "Packages";
/// Project manifest.
pub const MANIFEST: &str = "Packages/manifest.json";

/// A temporary project directory with helpers to lay out installed packages
/// and a manifest, then inspect the result.
///
/// # Example
///
/// ```rust,no_run
/// use gitdeps_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project.add_cached_package("com.example.x", &[("com.example.y", "https://git/y.git")]);
/// project.write_manifest(&[("com.unity.ugui", "1.0.0")]);
/// assert_eq!(project.manifest_names(), vec!["com.unity.ugui"]);
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary project root.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root path of the project.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the project.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Install a package into the package cache as `<name>@1.0.0/`.
    pub fn add_cached_package(&self, name: &str, git_dependencies: &[(&str, &str)]) -> PathBuf {
        let dir = format!("{PACKAGE_CACHE}/{name}@1.0.0");
        self.write_descriptor(&dir, &descriptor(name, git_dependencies));
        self.path(&dir)
    }

    /// Install a package into the local packages folder as `<name>/`.
    pub fn add_local_package(&self, name: &str, git_dependencies: &[(&str, &str)]) -> PathBuf {
        let dir = format!("{LOCAL_PACKAGES}/{name}");
        self.write_descriptor(&dir, &descriptor(name, git_dependencies));
        self.path(&dir)
    }

    /// Write `package.json` with arbitrary content into `relative_dir`.
    pub fn write_descriptor(&self, relative_dir: &str, content: &str) {
        self.write_file(&format!("{relative_dir}/package.json"), content);
    }

    /// Write a manifest whose `dependencies` holds `entries` in order.
    pub fn write_manifest(&self, entries: &[(&str, &str)]) {
        let dependencies: Map<String, Value> = entries
            .iter()
            .map(|(name, reference)| (name.to_string(), Value::String(reference.to_string())))
            .collect();
        let manifest = json!({ "dependencies": dependencies });
        self.write_file(MANIFEST, &serde_json::to_string_pretty(&manifest).unwrap());
    }

    /// Write a file relative to the root, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", full_path.display()));
    }

    /// Read a file relative to the root.
    pub fn read_file(&self, relative: &str) -> String {
        let full_path = self.path(relative);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Could not read {}: {e}", full_path.display()))
    }

    /// Parsed manifest document.
    pub fn manifest(&self) -> Value {
        serde_json::from_str(&self.read_file(MANIFEST)).expect("manifest is not valid JSON")
    }

    /// Manifest dependencies in file order.
    pub fn manifest_dependencies(&self) -> Vec<(String, String)> {
        let manifest = self.manifest();
        let dependencies = manifest["dependencies"]
            .as_object()
            .expect("manifest has no dependencies object");
        dependencies
            .iter()
            .map(|(name, reference)| {
                let reference = reference.as_str().expect("dependency value is not a string");
                (name.clone(), reference.to_string())
            })
            .collect()
    }

    /// Manifest dependency names in file order.
    pub fn manifest_names(&self) -> Vec<String> {
        self.manifest_dependencies()
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    /// Assert that `path` (relative to the root) exists.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` contains `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read_file(path);
        assert!(
            file_content.contains(content),
            "File {path} does not contain expected content.\nExpected: {content}\nActual: {file_content}"
        );
    }
}

/// Minimal valid descriptor JSON for `name` declaring `git_dependencies`.
pub fn descriptor(name: &str, git_dependencies: &[(&str, &str)]) -> String {
    let mut document = json!({
        "name": name,
        "version": "1.0.0",
        "displayName": name,
    });
    if !git_dependencies.is_empty() {
        let git: Map<String, Value> = git_dependencies
            .iter()
            .map(|(dep, reference)| (dep.to_string(), Value::String(reference.to_string())))
            .collect();
        document["gitDependencies"] = Value::Object(git);
    }
    serde_json::to_string_pretty(&document).unwrap()
}
