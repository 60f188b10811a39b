//! Status command implementation
//!
//! Reports installed packages and unresolved git dependencies without
//! touching the manifest.

use colored::Colorize;
use serde_json::json;

use gitdeps_core::find_unresolved;
use gitdeps_meta::PackageRecord;

use crate::context::ProjectContext;
use crate::error::Result;

/// Run the status command
pub fn run_status(context: &ProjectContext, json: bool) -> Result<()> {
    let reconciler = context.reconciler();
    let installed = reconciler.scan();
    let records: Vec<PackageRecord> = installed.iter().map(|p| p.record.clone()).collect();
    let unresolved = find_unresolved(&records);
    let store = reconciler.manifest_store();
    let manifest = store.load();

    let requested = |name: &str, reference: &str| {
        manifest
            .as_ref()
            .and_then(|m| m.get(name))
            .is_some_and(|current| current == reference)
    };

    if json {
        let output = json!({
            "project": reconciler.layout().root,
            "manifest": store.path(),
            "manifest_loaded": manifest.is_some(),
            "installed": installed.iter().map(|p| json!({
                "name": p.record.name,
                "version": p.record.version,
                "root": p.root.to_string(),
                "path": p.path,
            })).collect::<Vec<_>>(),
            "unresolved": unresolved.iter().map(|d| json!({
                "name": d.name,
                "reference": d.reference,
                "declared_by": d.declared_by,
                "requested": requested(&d.name, &d.reference),
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Git Dependency Status".bold());
    println!();
    println!("{}:     {}", "Project".dimmed(), reconciler.layout().root);
    match &manifest {
        Some(m) => println!(
            "{}:    {} ({} entries)",
            "Manifest".dimmed(),
            store.path(),
            m.dependencies.len()
        ),
        None => println!(
            "{}:    {} ({})",
            "Manifest".dimmed(),
            store.path(),
            "not loadable".red()
        ),
    }
    println!("{}:   {}", "Installed".dimmed(), installed.len());
    println!();

    println!("{}:", "Unresolved Git Dependencies".bold());
    if unresolved.is_empty() {
        println!("  {}", "None".dimmed());
    }
    for dep in &unresolved {
        let state = if requested(&dep.name, &dep.reference) {
            "requested".green()
        } else {
            "missing".yellow()
        };
        println!(
            "  {} {} {} ({}, from {})",
            "-".dimmed(),
            dep.name.cyan(),
            dep.reference,
            state,
            dep.declared_by
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitdeps_test_utils::TestProject;
    use gitdeps_test_utils::project::MANIFEST;

    #[test]
    fn test_status_does_not_write() {
        let project = TestProject::new();
        project.add_cached_package("com.example.x", &[("com.example.y", "git://y")]);
        project.write_manifest(&[("A", "1.0")]);
        let before = project.read_file(MANIFEST);

        let context = ProjectContext::load(project.root(), Some(project.root()), None).unwrap();
        run_status(&context, false).unwrap();
        run_status(&context, true).unwrap();

        assert_eq!(project.read_file(MANIFEST), before);
    }

    #[test]
    fn test_status_without_manifest() {
        let project = TestProject::new();
        let context = ProjectContext::load(project.root(), Some(project.root()), None).unwrap();
        assert!(run_status(&context, false).is_ok());
    }
}
