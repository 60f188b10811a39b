//! Package descriptor and dependency manifest models.
//!
//! This crate reads installed package descriptors into [`PackageRecord`]s
//! and loads/persists the project's root [`ManifestRecord`].

pub mod error;
pub mod manifest;
pub mod package;

/// The canonical filename of a package descriptor.
pub const DESCRIPTOR_FILENAME: &str = "package.json";

pub use error::{DescriptorError, Error, ManifestLoadError, Result};
pub use manifest::{ManifestRecord, ManifestStore};
pub use package::PackageRecord;
