//! Error types for gitdeps-meta

use std::path::PathBuf;

/// Result type for gitdeps-meta operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that escape this crate.
///
/// Only persistence can fail loudly; reading descriptors and manifests
/// degrades to `None` (see [`DescriptorError`] and [`ManifestLoadError`]).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem error from gitdeps-fs
    #[error(transparent)]
    Fs(#[from] gitdeps_fs::Error),

    /// Failed to render the manifest as JSON
    #[error("failed to serialize manifest {path}: {source}")]
    ManifestSerialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a package descriptor was rejected.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error(transparent)]
    Read(#[from] gitdeps_fs::Error),

    #[error("descriptor is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("descriptor root is not a JSON object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` should be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

/// Why the dependency manifest could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ManifestLoadError {
    #[error("manifest not found at {0}")]
    NotFound(PathBuf),

    #[error(transparent)]
    Read(gitdeps_fs::Error),

    #[error("manifest is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("manifest root is not a JSON object")]
    NotAnObject,

    #[error("manifest has no `dependencies` object")]
    MissingDependencies,

    #[error("dependency `{0}` does not map to a string")]
    NonStringReference(String),
}
