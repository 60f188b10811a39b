//! Scenario tests
//!
//! Whole-project flows across the fs, meta and core crates: a package
//! manager that installs what the manifest requests is simulated by adding
//! the requested packages to the cache between passes.

use gitdeps_core::{Reconciler, Resolution, ResolveTrigger, DiagnosticLevel, Result};
use gitdeps_fs::NormalizedPath;
use gitdeps_meta::{ManifestRecord, ManifestStore, PackageRecord};
use gitdeps_test_utils::TestProject;
use gitdeps_test_utils::project::MANIFEST;
use pretty_assertions::assert_eq;

// =============================================================================
// Helpers
// =============================================================================

fn reconciler(project: &TestProject) -> Reconciler {
    Reconciler::from_project(project.root()).unwrap()
}

/// Install every manifest entry that looks like a git reference and is not
/// in the cache yet, declaring `declares` for the given names.
fn install_requested(project: &TestProject, declares: &[(&str, &[(&str, &str)])]) {
    for (name, reference) in project.manifest_dependencies() {
        if !reference.starts_with("git://") {
            continue;
        }
        let git = declares
            .iter()
            .find(|(declared, _)| *declared == name)
            .map(|(_, git)| *git)
            .unwrap_or(&[]);
        if !project.path(&format!("Library/PackageCache/{name}@1.0.0")).exists() {
            project.add_cached_package(&name, git);
        }
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn transitive_git_dependencies_resolve_over_several_passes() {
    let project = TestProject::new();
    project.add_local_package("com.studio.game", &[("com.studio.net", "git://net")]);
    project.write_manifest(&[("com.unity.ugui", "1.0.0")]);
    let reconciler = reconciler(&project);
    let chain: &[(&str, &[(&str, &str)])] = &[
        ("com.studio.net", &[("com.studio.codec", "git://codec")]),
        ("com.studio.codec", &[]),
    ];

    // Pass 1: the direct git dependency is requested.
    assert!(reconciler.run().unwrap().manifest_changed());
    assert_eq!(project.manifest_names(), vec!["com.studio.net", "com.unity.ugui"]);

    // The package manager installs it; it declares its own git dependency.
    install_requested(&project, chain);
    assert!(reconciler.run().unwrap().manifest_changed());
    assert_eq!(
        project.manifest_names(),
        vec!["com.studio.codec", "com.studio.net", "com.unity.ugui"]
    );

    // Everything installed: nothing left to do, manifest untouched.
    install_requested(&project, chain);
    let before = project.read_file(MANIFEST);
    assert_eq!(reconciler.run().unwrap(), Resolution::NothingToResolve);
    assert_eq!(project.read_file(MANIFEST), before);
}

#[test]
fn several_declaring_packages_merge_into_one_write() {
    let project = TestProject::new();
    project.add_cached_package("a.cached", &[("dep.one", "git://one")]);
    project.add_local_package("b.local", &[("dep.two", "git://two"), ("dep.one", "git://one")]);
    project.write_manifest(&[("base", "1.0")]);

    let resolution = reconciler(&project).run().unwrap();

    let Resolution::Updated { added, .. } = &resolution else {
        panic!("expected an update, got {resolution:?}");
    };
    let added: Vec<(&str, &str)> = added
        .iter()
        .map(|d| (d.name.as_str(), d.declared_by.as_str()))
        .collect();
    assert_eq!(added, vec![("dep.one", "b.local"), ("dep.two", "b.local")]);
    // Discovery: dep.one (cache), dep.two, dep.one (local). Reversed and
    // deduplicated at first sight.
    assert_eq!(project.manifest_names(), vec!["dep.one", "dep.two", "base"]);
}

#[test]
fn error_diagnostic_after_install_is_one_shot() {
    let project = TestProject::new();
    project.write_manifest(&[]);

    let mut changes = 0;
    let mut trigger = ResolveTrigger::new(reconciler(&project), |_: &Resolution| -> Result<()> {
        changes += 1;
        Ok(())
    });
    assert_eq!(trigger.startup().unwrap(), Resolution::NothingToResolve);

    // A package with a missing git dependency arrives and compilation fails.
    project.add_cached_package("com.example.x", &[("com.example.y", "git://y")]);
    let first = trigger.diagnostic(DiagnosticLevel::classify("error CS0246")).unwrap();
    assert!(first.is_some_and(|r| r.manifest_changed()));

    // A later error does nothing until the next start-up.
    project.add_cached_package("com.example.z", &[("com.example.w", "git://w")]);
    assert!(trigger.diagnostic(DiagnosticLevel::Error).unwrap().is_none());
    assert!(trigger.startup().unwrap().manifest_changed());
    drop(trigger);

    assert_eq!(changes, 2);
    assert_eq!(
        project.manifest_names(),
        vec!["com.example.w", "com.example.y"]
    );
}

// =============================================================================
// Manifest store
// =============================================================================

#[test]
fn saved_manifest_reloads_with_same_content() {
    let project = TestProject::new();
    let store = ManifestStore::new(NormalizedPath::new(project.path(MANIFEST)));
    let record = ManifestRecord::from_dependencies([
        ("com.example.b", "git://b"),
        ("com.example.a", "1.2.3"),
    ]);

    store.save(&record).unwrap();
    let reloaded = store.load().unwrap();

    assert_eq!(reloaded.dependencies, record.dependencies);
    assert_eq!(reloaded.get("com.example.b"), Some("git://b"));
    assert!(project.read_file(MANIFEST).ends_with("}\n"));
}

#[test]
fn descriptor_without_required_identity_is_no_record() {
    let project = TestProject::new();
    for (dir, body) in [
        ("no-name", r#"{"version": "1.0.0", "displayName": "X"}"#),
        ("no-version", r#"{"name": "x", "displayName": "X"}"#),
        ("no-display", r#"{"name": "x", "version": "1.0.0"}"#),
        ("numeric-name", r#"{"name": 7, "version": "1.0.0", "displayName": "X"}"#),
    ] {
        project.write_descriptor(&format!("Packages/{dir}"), body);
        let path = NormalizedPath::new(project.path(&format!("Packages/{dir}")));
        assert_eq!(PackageRecord::from_directory(&path), None, "{dir}");
    }

    project.write_manifest(&[]);
    assert!(reconciler(&project).scan().is_empty());
}
