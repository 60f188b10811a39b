//! Shared test utilities for the gitdeps workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`](project::TestProject) builder for Unity-style
//!   project trees with installed packages and a manifest

pub mod project;

pub use project::TestProject;
