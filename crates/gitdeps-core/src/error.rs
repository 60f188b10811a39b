//! Error types for gitdeps-core

/// Result type for gitdeps-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gitdeps-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Resolver configuration is unusable
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The post-update refresh command failed
    #[error("Refresh command '{command}' failed: {message}")]
    RefreshFailed { command: String, message: String },

    /// Spawning a subprocess failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Filesystem error from gitdeps-fs
    #[error(transparent)]
    Fs(#[from] gitdeps_fs::Error),

    /// Manifest persistence error from gitdeps-meta
    #[error(transparent)]
    Meta(#[from] gitdeps_meta::Error),
}
