//! Resolver configuration (`gitdeps.toml`)
//!
//! Every field has a default, so a project without a config file behaves
//! like a stock Unity project:
//!
//! ```toml
//! [paths]
//! package_cache = "Library/PackageCache"
//! local_packages = "Packages"
//! manifest = "Packages/manifest.json"
//! descriptor = "package.json"
//!
//! [merge]
//! order = "legacy"
//!
//! [refresh]
//! command = "touch"
//! args = ["${MANIFEST_PATH}"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use gitdeps_fs::{ConfigStore, NormalizedPath, ProjectLayout, ProjectPath, is_confined_relative};

use crate::error::{Error, Result};

/// Where newly discovered git dependencies land in the manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertionOrder {
    /// Each entry is inserted at the front in turn, so the block of new
    /// entries ends up in reverse discovery order.
    #[default]
    Legacy,
    /// New entries are placed at the front in discovery order.
    Discovery,
}

/// Relative locations of the scanned and written files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub package_cache: String,
    pub local_packages: String,
    pub manifest: String,
    pub descriptor: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            package_cache: ProjectPath::PackageCache.as_str().to_string(),
            local_packages: ProjectPath::LocalPackages.as_str().to_string(),
            manifest: ProjectPath::Manifest.as_str().to_string(),
            descriptor: ProjectPath::Descriptor.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    pub order: InsertionOrder,
}

/// Command run after the user acknowledges a manifest update.
///
/// `${PROJECT_ROOT}` and `${MANIFEST_PATH}` in `args` are substituted, and
/// both are also exported as environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Top-level resolver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    pub paths: PathsConfig,
    pub merge: MergeConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh: Option<RefreshConfig>,
}

impl ResolverConfig {
    /// Load `gitdeps.toml` from the project root, falling back to defaults
    /// when the file does not exist.
    pub fn load(project_root: impl AsRef<Path>) -> Result<Self> {
        let path = ProjectLayout::new(project_root).config_path();
        Self::load_from(&path)
    }

    /// Load configuration from an explicit file (TOML, JSON or YAML).
    pub fn load_from(path: &NormalizedPath) -> Result<Self> {
        let config: Self = ConfigStore::new().load_or_default(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject paths that escape the project and malformed refresh commands.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("paths.package_cache", &self.paths.package_cache),
            ("paths.local_packages", &self.paths.local_packages),
            ("paths.manifest", &self.paths.manifest),
        ] {
            if !is_confined_relative(value) {
                return Err(Error::InvalidConfig {
                    message: format!("{key} must be a relative path inside the project, got {value:?}"),
                });
            }
        }

        let descriptor = &self.paths.descriptor;
        if !is_confined_relative(descriptor) || descriptor.contains(['/', '\\']) {
            return Err(Error::InvalidConfig {
                message: format!("paths.descriptor must be a plain file name, got {descriptor:?}"),
            });
        }

        if let Some(refresh) = &self.refresh
            && refresh.command.trim().is_empty()
        {
            return Err(Error::InvalidConfig {
                message: "refresh.command must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Resolve the configured paths against a project root.
    pub fn layout(&self, project_root: impl AsRef<Path>) -> ProjectLayout {
        ProjectLayout::new(project_root)
            .with_package_cache(&self.paths.package_cache)
            .with_local_packages(&self.paths.local_packages)
            .with_manifest(&self.paths.manifest)
            .with_descriptor(&self.paths.descriptor)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })
    }
}
