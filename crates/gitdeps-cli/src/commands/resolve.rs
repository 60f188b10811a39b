//! Resolve command implementation
//!
//! Manual trigger: one reconciliation pass, a confirmation when the
//! manifest changed, then a report.

use colored::Colorize;
use serde_json::json;

use gitdeps_core::{Resolution, ResolveTrigger, UnresolvedGitDependency};

use crate::context::ProjectContext;
use crate::error::Result;
use crate::interactive::{CliNotifier, Prompt};

/// Flags of `gitdeps resolve`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    pub yes: bool,
    pub dry_run: bool,
    pub json: bool,
}

/// Run the resolve command
pub fn run_resolve(context: &ProjectContext, options: ResolveOptions) -> Result<Resolution> {
    let reconciler = context.reconciler().with_dry_run(options.dry_run);
    let prompt = if options.json {
        Prompt::Silent
    } else {
        Prompt::detect(options.yes)
    };
    let notifier = CliNotifier::new(context.layout(), context.config.refresh.clone(), prompt);

    let mut trigger = ResolveTrigger::new(reconciler, notifier);
    let resolution = trigger.manual()?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&resolution_json(&resolution))?);
    } else {
        print_resolution(&resolution);
    }

    Ok(resolution)
}

/// Machine-readable form of a pass outcome.
pub fn resolution_json(resolution: &Resolution) -> serde_json::Value {
    json!({
        "changed": resolution.manifest_changed(),
        "resolution": resolution,
    })
}

/// Human-readable report of a pass outcome.
pub fn print_resolution(resolution: &Resolution) {
    match resolution {
        Resolution::NothingToResolve => {
            println!(
                "{} All git dependencies are installed.",
                "OK".green().bold()
            );
        }
        Resolution::ManifestUnavailable { unresolved } => {
            println!(
                "{} {} unresolved git {}, but the manifest could not be loaded:",
                "!".yellow().bold(),
                unresolved.len(),
                plural(unresolved.len()),
            );
            print_entries(unresolved, "?".yellow().to_string());
        }
        Resolution::AlreadyRequested { unresolved } => {
            println!(
                "{} The manifest already requests {} unresolved git {}.",
                "OK".green().bold(),
                unresolved.len(),
                plural(unresolved.len()),
            );
            println!("   Waiting for the package manager to install them.");
        }
        Resolution::Updated {
            manifest,
            added,
            persisted,
        } => {
            if *persisted {
                println!(
                    "{} Added {} git {} to {}:",
                    "Updated".green().bold(),
                    added.len(),
                    plural(added.len()),
                    manifest.as_str().cyan()
                );
                print_entries(added, "+".green().to_string());
            } else {
                println!(
                    "{} Would add {} git {} to {}:",
                    "[dry-run]".yellow(),
                    added.len(),
                    plural(added.len()),
                    manifest.as_str().cyan()
                );
                print_entries(added, "+".yellow().to_string());
            }
        }
    }
}

fn print_entries(entries: &[UnresolvedGitDependency], marker: String) {
    for dep in entries {
        println!(
            "  {} {} {} {}",
            marker,
            dep.name.cyan(),
            dep.reference,
            format!("(from {})", dep.declared_by).dimmed()
        );
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "dependency" } else { "dependencies" }
}
