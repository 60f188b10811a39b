//! Project layout and package directory enumeration
//!
//! A project has two scan roots whose immediate subdirectories are package
//! roots: the package-manager cache and the user-owned packages folder.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{NormalizedPath, ProjectPath};

/// Which scan root a package directory was found under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanRoot {
    /// Read-only cache maintained by the package manager
    PackageCache,
    /// User-editable local packages
    LocalPackages,
}

impl std::fmt::Display for ScanRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PackageCache => write!(f, "cache"),
            Self::LocalPackages => write!(f, "local"),
        }
    }
}

/// A candidate package directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDir {
    pub root: ScanRoot,
    pub path: NormalizedPath,
}

/// Resolved locations of everything the resolver reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: NormalizedPath,
    pub package_cache: NormalizedPath,
    pub local_packages: NormalizedPath,
    pub manifest: NormalizedPath,
    pub descriptor: String,
}

impl ProjectLayout {
    /// Layout with the standard relative locations under `root`.
    ///
    /// The root is canonicalized when it exists so logged paths are stable.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let root = NormalizedPath::new(dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf()));

        Self {
            package_cache: root.join(ProjectPath::PackageCache.as_str()),
            local_packages: root.join(ProjectPath::LocalPackages.as_str()),
            manifest: root.join(ProjectPath::Manifest.as_str()),
            descriptor: ProjectPath::Descriptor.as_str().to_string(),
            root,
        }
    }

    pub fn with_package_cache(mut self, relative: &str) -> Self {
        self.package_cache = self.root.join(relative);
        self
    }

    pub fn with_local_packages(mut self, relative: &str) -> Self {
        self.local_packages = self.root.join(relative);
        self
    }

    pub fn with_manifest(mut self, relative: &str) -> Self {
        self.manifest = self.root.join(relative);
        self
    }

    pub fn with_descriptor(mut self, file_name: &str) -> Self {
        self.descriptor = file_name.to_string();
        self
    }

    /// Descriptor file location for a package directory.
    pub fn descriptor_path(&self, package_dir: &NormalizedPath) -> NormalizedPath {
        package_dir.join(&self.descriptor)
    }

    /// Path of the optional resolver configuration file.
    pub fn config_path(&self) -> NormalizedPath {
        self.root.join(ProjectPath::Config.as_str())
    }

    /// Enumerate candidate package directories: cache entries first, then
    /// local entries, each root sorted by name.
    ///
    /// Only immediate subdirectories count. A scan root that is missing or
    /// unreadable contributes nothing.
    pub fn package_dirs(&self) -> Vec<PackageDir> {
        [
            (ScanRoot::PackageCache, &self.package_cache),
            (ScanRoot::LocalPackages, &self.local_packages),
        ]
        .into_iter()
        .flat_map(|(root, dir)| {
            subdirectories(dir)
                .into_iter()
                .map(move |path| PackageDir { root, path })
        })
        .collect()
    }
}

fn subdirectories(dir: &NormalizedPath) -> Vec<NormalizedPath> {
    let entries = match fs::read_dir(dir.to_native()) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(path = %dir, error = %e, "Scan root unavailable");
            return Vec::new();
        }
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();

    dirs.into_iter().map(NormalizedPath::new).collect()
}
