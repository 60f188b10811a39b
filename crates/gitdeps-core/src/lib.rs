//! Git dependency reconciliation
//!
//! Packages may declare `gitDependencies` that the package manager does not
//! resolve transitively. This crate finds the ones no installed package
//! satisfies and adds them to the project manifest:
//!
//! - **Reconciler**: scan installed packages, diff, merge, persist
//! - **Configuration**: optional `gitdeps.toml` with paths and merge order
//! - **Triggers**: start-up, manual, and one-shot error-diagnostic passes
//! - **Refresh**: optional command run after the user acknowledges an update
//!
//! ```text
//!        gitdeps-cli
//!             |
//!        gitdeps-core
//!          /      \
//! gitdeps-meta  gitdeps-fs
//! ```

pub mod config;
pub mod error;
pub mod reconcile;
pub mod refresh;
pub mod trigger;

pub use config::{InsertionOrder, MergeConfig, PathsConfig, RefreshConfig, ResolverConfig};
pub use error::{Error, Result};
pub use reconcile::{
    InstalledPackage, Reconciler, Resolution, Resolve, UnresolvedGitDependency, find_unresolved,
    merge_unresolved,
};
pub use refresh::{RefreshResult, run_refresh};
pub use trigger::{ChangeNotifier, DiagnosticLevel, ResolveTrigger};
