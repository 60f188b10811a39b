//! Project context detection
//!
//! Commands work from anywhere inside a project: the root is the nearest
//! ancestor holding a manifest or a resolver configuration.

use std::path::{Path, PathBuf};

use gitdeps_core::{Reconciler, ResolverConfig};
use gitdeps_fs::{NormalizedPath, ProjectLayout, ProjectPath};

use crate::error::{CliError, Result};

/// A located project and its effective configuration.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub root: PathBuf,
    pub config: ResolverConfig,
}

impl ProjectContext {
    /// Resolve the project root and load its configuration.
    ///
    /// An explicit `project` is used as given; otherwise the search walks up
    /// from `cwd`. An explicit `config` file must exist.
    pub fn load(cwd: &Path, project: Option<&Path>, config: Option<&Path>) -> Result<Self> {
        let root = match project {
            Some(project) => {
                let root = cwd.join(project);
                if !root.is_dir() {
                    return Err(CliError::user(format!(
                        "Project directory not found: {}",
                        root.display()
                    )));
                }
                root
            }
            None => detect_project_root(cwd).unwrap_or_else(|| cwd.to_path_buf()),
        };

        let config = match config {
            Some(path) => {
                let path = cwd.join(path);
                if !path.is_file() {
                    return Err(CliError::user(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                ResolverConfig::load_from(&NormalizedPath::new(path))?
            }
            None => ResolverConfig::load(&root)?,
        };

        tracing::debug!(root = %root.display(), "Project context loaded");
        Ok(Self { root, config })
    }

    pub fn layout(&self) -> ProjectLayout {
        self.config.layout(&self.root)
    }

    pub fn reconciler(&self) -> Reconciler {
        Reconciler::from_config(&self.config, &self.root)
    }
}

/// Walk up from `cwd` to the first directory containing the default
/// manifest or a `gitdeps.toml`.
pub fn detect_project_root(cwd: &Path) -> Option<PathBuf> {
    cwd.ancestors()
        .find(|dir| {
            dir.join(ProjectPath::Manifest).is_file() || dir.join(ProjectPath::Config).is_file()
        })
        .map(Path::to_path_buf)
}
