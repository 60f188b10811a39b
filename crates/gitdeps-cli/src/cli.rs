//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// gitdeps - Add missing git dependencies of installed packages to the project manifest
#[derive(Parser, Debug)]
#[command(name = "gitdeps")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root (defaults to the nearest directory with a manifest)
    #[arg(short = 'C', long, global = true, env = "GITDEPS_PROJECT")]
    pub project: Option<PathBuf>,

    /// Resolver configuration file (defaults to <project>/gitdeps.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Add unresolved git dependencies to the manifest
    ///
    /// Examples:
    ///   gitdeps resolve              # Resolve and confirm
    ///   gitdeps resolve --dry-run    # Show what would be added
    ///   gitdeps resolve --yes --json # Non-interactive, for scripts
    Resolve {
        /// Skip the confirmation dialog
        #[arg(short, long)]
        yes: bool,

        /// Preview changes without writing the manifest
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show installed packages and unresolved git dependencies
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Resolve once, then again on the first error read from stdin
    ///
    /// Pipe the host's log into this command:
    ///   tail -f Editor.log | gitdeps watch
    Watch {
        /// Skip the confirmation dialog
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the effective resolver configuration
    Config,
}
