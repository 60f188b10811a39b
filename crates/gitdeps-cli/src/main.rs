//! gitdeps CLI
//!
//! Adds git dependencies declared by installed packages, but not installed
//! themselves, to the project manifest.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::ResolveOptions;
use context::ProjectContext;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        // No command provided - show help hint
        println!("{} git dependency resolver", "gitdeps".green().bold());
        println!();
        println!("Run {} for available commands.", "gitdeps --help".cyan());
        return Ok(());
    };

    let cwd = std::env::current_dir()?;
    let context = ProjectContext::load(&cwd, cli.project.as_deref(), cli.config.as_deref())?;
    execute_command(&context, command)
}

fn execute_command(context: &ProjectContext, command: Commands) -> Result<()> {
    match command {
        Commands::Resolve { yes, dry_run, json } => {
            commands::run_resolve(context, ResolveOptions { yes, dry_run, json })?;
            Ok(())
        }
        Commands::Status { json } => commands::run_status(context, json),
        Commands::Watch { yes } => {
            commands::run_watch(context, yes)?;
            Ok(())
        }
        Commands::Config => commands::run_config(context),
    }
}

/// Logs go to stderr. `--verbose` forces debug, otherwise `RUST_LOG` is
/// honoured with a `warn` default.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let initialized = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
    if initialized.is_ok() {
        tracing::debug!("Verbose mode enabled");
    }
}
