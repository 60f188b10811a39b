//! Filesystem abstraction for the git dependency resolver
//!
//! Provides normalized paths, project layout resolution, scan-root
//! enumeration and locked atomic writes.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;

pub use config::ConfigStore;
pub use constants::ProjectPath;
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use layout::{PackageDir, ProjectLayout, ScanRoot};
pub use path::{NormalizedPath, is_confined_relative};
