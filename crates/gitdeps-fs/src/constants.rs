//! Well-known project paths.

use std::path::Path;

/// Fixed locations inside a project, relative to its root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectPath {
    /// Package-manager-owned cache of resolved packages
    PackageCache,
    /// User-owned embedded packages
    LocalPackages,
    /// The root dependency manifest
    Manifest,
    /// Per-package descriptor file name
    Descriptor,
    /// Optional resolver configuration file
    Config,
}

impl ProjectPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PackageCache => "Library/PackageCache",
            Self::LocalPackages => "Packages",
            Self::Manifest => "Packages/manifest.json",
            Self::Descriptor => "package.json",
            Self::Config => "gitdeps.toml",
        }
    }
}

impl AsRef<Path> for ProjectPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ProjectPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
