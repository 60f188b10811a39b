//! Command implementations for gitdeps-cli

pub mod config;
pub mod resolve;
pub mod status;
pub mod watch;

pub use config::run_config;
pub use resolve::{ResolveOptions, run_resolve};
pub use status::run_status;
pub use watch::run_watch;
