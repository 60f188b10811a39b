//! Git dependency reconciliation
//!
//! One pass scans every installed package, collects the git dependencies
//! they declare, keeps those that no installed package satisfies and merges
//! them into the front of the project manifest.

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;

use gitdeps_fs::{NormalizedPath, ProjectLayout, ScanRoot};
use gitdeps_meta::{ManifestStore, PackageRecord};

use crate::config::{InsertionOrder, ResolverConfig};
use crate::error::Result;

/// A package whose descriptor parsed successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub root: ScanRoot,
    pub path: NormalizedPath,
    pub record: PackageRecord,
}

/// A git dependency declared by an installed package but not installed
/// itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedGitDependency {
    pub name: String,
    pub reference: String,
    /// Name of the package that declared it.
    pub declared_by: String,
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum Resolution {
    /// Every declared git dependency is installed.
    NothingToResolve,
    /// There are unresolved dependencies but no usable manifest to add them to.
    ManifestUnavailable {
        unresolved: Vec<UnresolvedGitDependency>,
    },
    /// The manifest already requests every unresolved dependency.
    AlreadyRequested {
        unresolved: Vec<UnresolvedGitDependency>,
    },
    /// The manifest gained entries.
    Updated {
        manifest: NormalizedPath,
        added: Vec<UnresolvedGitDependency>,
        /// False for a dry run.
        persisted: bool,
    },
}

impl Resolution {
    /// True when the manifest on disk was rewritten.
    pub fn manifest_changed(&self) -> bool {
        matches!(self, Self::Updated { persisted: true, .. })
    }
}

/// Anything that can run a reconciliation pass.
pub trait Resolve {
    fn resolve(&self) -> Result<Resolution>;
}

/// Runs reconciliation passes over one project.
#[derive(Debug, Clone)]
pub struct Reconciler {
    layout: ProjectLayout,
    order: InsertionOrder,
    dry_run: bool,
}

impl Reconciler {
    pub fn new(layout: ProjectLayout) -> Self {
        Self {
            layout,
            order: InsertionOrder::default(),
            dry_run: false,
        }
    }

    /// Reconciler for `project_root` configured from its `gitdeps.toml`.
    pub fn from_project(project_root: impl AsRef<Path>) -> Result<Self> {
        let config = ResolverConfig::load(project_root.as_ref())?;
        Ok(Self::from_config(&config, project_root))
    }

    pub fn from_config(config: &ResolverConfig, project_root: impl AsRef<Path>) -> Self {
        Self::new(config.layout(project_root)).with_order(config.merge.order)
    }

    pub fn with_order(mut self, order: InsertionOrder) -> Self {
        self.order = order;
        self
    }

    /// Compute and report the merge without writing the manifest.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn manifest_store(&self) -> ManifestStore {
        ManifestStore::new(self.layout.manifest.clone())
    }

    /// Every package directory under both scan roots with a valid descriptor.
    pub fn scan(&self) -> Vec<InstalledPackage> {
        self.layout
            .package_dirs()
            .into_iter()
            .filter_map(|dir| {
                let descriptor = self.layout.descriptor_path(&dir.path);
                match PackageRecord::from_descriptor_path(&descriptor) {
                    Some(record) => Some(InstalledPackage {
                        root: dir.root,
                        path: dir.path,
                        record,
                    }),
                    None => {
                        tracing::debug!(path = %dir.path, "Skipping directory without a valid descriptor");
                        None
                    }
                }
            })
            .collect()
    }

    /// Run one pass: scan, diff, merge and persist.
    pub fn run(&self) -> Result<Resolution> {
        let installed = self.scan();
        let records: Vec<PackageRecord> = installed.into_iter().map(|p| p.record).collect();
        let unresolved = find_unresolved(&records);

        if unresolved.is_empty() {
            tracing::debug!(installed = records.len(), "All git dependencies are installed");
            return Ok(Resolution::NothingToResolve);
        }

        let store = self.manifest_store();
        let Some(mut manifest) = store.load() else {
            tracing::warn!(
                path = %store.path(),
                count = unresolved.len(),
                "Unresolved git dependencies found but the manifest could not be loaded"
            );
            return Ok(Resolution::ManifestUnavailable { unresolved });
        };

        let merged = merge_unresolved(&manifest.dependencies, &unresolved, self.order);
        if merged == manifest.dependencies {
            tracing::debug!("Manifest already requests every unresolved git dependency");
            return Ok(Resolution::AlreadyRequested { unresolved });
        }

        let added = changed_entries(&manifest.dependencies, &merged, &unresolved);
        manifest.dependencies = merged;

        if !self.dry_run {
            store.save(&manifest)?;
            for dep in &added {
                tracing::info!(name = %dep.name, reference = %dep.reference, "Added git dependency to manifest");
            }
        }

        Ok(Resolution::Updated {
            manifest: store.path().clone(),
            added,
            persisted: !self.dry_run,
        })
    }
}

impl Resolve for Reconciler {
    fn resolve(&self) -> Result<Resolution> {
        self.run()
    }
}

/// Git dependencies with a non-empty reference whose name is not among the
/// installed packages, in discovery order.
pub fn find_unresolved(installed: &[PackageRecord]) -> Vec<UnresolvedGitDependency> {
    let names: HashSet<&str> = installed.iter().map(|p| p.name.as_str()).collect();

    installed
        .iter()
        .flat_map(|package| {
            package
                .git_dependencies()
                .map(move |(name, reference)| (package, name, reference))
        })
        .filter(|(_, name, reference)| !reference.is_empty() && !names.contains(name))
        .map(|(package, name, reference)| UnresolvedGitDependency {
            name: name.to_string(),
            reference: reference.to_string(),
            declared_by: package.name.clone(),
        })
        .collect()
}

/// Merge unresolved dependencies into the front of `dependencies`.
///
/// The pairs are inserted at the front one after another and the result is
/// collapsed by name. A name keeps the position of its first occurrence in
/// that sequence and the value written last, so a reference the manifest
/// already holds is kept, and among duplicate requests the first one
/// discovered wins. `order` only changes positions, never values.
pub fn merge_unresolved(
    dependencies: &IndexMap<String, String>,
    unresolved: &[UnresolvedGitDependency],
    order: InsertionOrder,
) -> IndexMap<String, String> {
    // Repeated insertion at index 0 leaves the new block reversed.
    let inserted = unresolved
        .iter()
        .rev()
        .map(|dep| (&dep.name, &dep.reference))
        .chain(dependencies.iter());

    let mut merged = IndexMap::with_capacity(dependencies.len() + unresolved.len());
    for (name, reference) in inserted {
        merged.insert(name.clone(), reference.clone());
    }

    if order == InsertionOrder::Discovery {
        let positions = unresolved.iter().map(|dep| &dep.name).chain(dependencies.keys());
        let mut reordered = IndexMap::with_capacity(merged.len());
        for name in positions {
            if let Some(reference) = merged.get(name) {
                reordered
                    .entry(name.clone())
                    .or_insert_with(|| reference.clone());
            }
        }
        merged = reordered;
    }

    merged
}

// Unresolved entries whose merged reference differs from the manifest's,
// one per name, in merged order.
fn changed_entries(
    before: &IndexMap<String, String>,
    after: &IndexMap<String, String>,
    unresolved: &[UnresolvedGitDependency],
) -> Vec<UnresolvedGitDependency> {
    after
        .iter()
        .filter(|(name, reference)| before.get(*name) != Some(*reference))
        .filter_map(|(name, reference)| {
            unresolved
                .iter()
                .rev()
                .find(|dep| &dep.name == name && &dep.reference == reference)
                .cloned()
        })
        .collect()
}
