//! Manifest update confirmation
//!
//! Uses dialoguer for the acknowledgement prompt. After the user
//! acknowledges, the configured refresh command (if any) is run.

use std::io::IsTerminal;

use colored::Colorize;
use dialoguer::Confirm;
use gitdeps_core::{ChangeNotifier, RefreshConfig, Resolution, run_refresh};
use gitdeps_fs::{NormalizedPath, ProjectLayout};

/// Dialog title shown above the update message.
pub const DIALOG_TITLE: &str = "Dependencies Resolver";

/// Body of the update dialog.
pub fn update_message(manifest: &NormalizedPath) -> String {
    format!(
        "New git dependencies were detected in one or more custom packages and were added to {manifest}. \
         The package manager resolves them after the editor is unfocused and focused again."
    )
}

/// How the notifier interacts with the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Show the dialog and wait for acknowledgement.
    Ask,
    /// Show the dialog and continue without waiting.
    Inform,
    /// Print nothing and treat the update as acknowledged.
    Silent,
}

impl Prompt {
    /// `Ask` only when the user can answer on a terminal.
    pub fn detect(assume_yes: bool) -> Self {
        if assume_yes {
            Self::Silent
        } else if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() {
            Self::Ask
        } else {
            Self::Inform
        }
    }
}

/// Tells the user about manifest updates and runs the refresh command once
/// they acknowledge.
pub struct CliNotifier {
    layout: ProjectLayout,
    refresh: Option<RefreshConfig>,
    prompt: Prompt,
    /// Number of updates acknowledged so far.
    pub acknowledged: usize,
}

impl CliNotifier {
    pub fn new(layout: ProjectLayout, refresh: Option<RefreshConfig>, prompt: Prompt) -> Self {
        Self {
            layout,
            refresh,
            prompt,
            acknowledged: 0,
        }
    }

    fn acknowledge(&self, manifest: &NormalizedPath) -> gitdeps_core::Result<bool> {
        if self.prompt == Prompt::Silent {
            return Ok(true);
        }

        eprintln!();
        eprintln!("{}", DIALOG_TITLE.bold());
        eprintln!("{}", update_message(manifest));

        if self.prompt == Prompt::Inform {
            return Ok(true);
        }

        let ok = Confirm::new()
            .with_prompt("Ok")
            .default(true)
            .interact()
            .map_err(std::io::Error::other)?;
        Ok(ok)
    }

    fn refresh(&self) {
        let Some(refresh) = &self.refresh else {
            return;
        };
        match run_refresh(refresh, &self.layout) {
            Ok(result) => {
                tracing::debug!(command = %result.command, "Refresh command finished");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Refresh command failed");
                if self.prompt != Prompt::Silent {
                    eprintln!("{}: {}", "warning".yellow().bold(), e);
                }
            }
        }
    }
}

impl ChangeNotifier for CliNotifier {
    fn manifest_changed(&mut self, resolution: &Resolution) -> gitdeps_core::Result<()> {
        let Resolution::Updated { manifest, .. } = resolution else {
            return Ok(());
        };

        if self.acknowledge(manifest)? {
            self.acknowledged += 1;
            self.refresh();
        } else {
            tracing::debug!("Update not acknowledged, skipping refresh");
        }
        Ok(())
    }
}
