//! Watch command implementation
//!
//! Runs the start-up pass, then reads host diagnostics line by line and
//! runs one more pass on the first error. The input is drained until EOF
//! so a piped log producer never blocks.

use std::io::BufRead;

use colored::Colorize;

use gitdeps_core::{ChangeNotifier, DiagnosticLevel, Resolve, ResolveTrigger};

use super::resolve::print_resolution;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::interactive::{CliNotifier, Prompt};

/// What happened while watching.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WatchSummary {
    pub lines: usize,
    pub errors: usize,
    pub passes: usize,
}

/// Run the watch command against stdin
pub fn run_watch(context: &ProjectContext, yes: bool) -> Result<WatchSummary> {
    // stdin carries the diagnostics, so the dialog can only inform.
    let prompt = if yes { Prompt::Silent } else { Prompt::Inform };
    let notifier = CliNotifier::new(context.layout(), context.config.refresh.clone(), prompt);
    let mut trigger = ResolveTrigger::new(context.reconciler(), notifier);

    let stdin = std::io::stdin();
    let summary = watch(&mut trigger, stdin.lock())?;

    tracing::debug!(
        lines = summary.lines,
        errors = summary.errors,
        passes = summary.passes,
        "Diagnostic stream closed"
    );
    Ok(summary)
}

/// Drive `trigger` with a start-up pass followed by the diagnostics in
/// `input`.
pub fn watch<R, N>(trigger: &mut ResolveTrigger<R, N>, input: impl BufRead) -> Result<WatchSummary>
where
    R: Resolve,
    N: ChangeNotifier,
{
    let mut summary = WatchSummary::default();

    println!("{} Start-up pass", "watch".cyan().bold());
    print_resolution(&trigger.startup()?);
    summary.passes += 1;

    for line in input.lines() {
        let line = line?;
        summary.lines += 1;

        let level = DiagnosticLevel::classify(&line);
        if level == DiagnosticLevel::Error {
            summary.errors += 1;
        }

        if let Some(resolution) = trigger.diagnostic(level)? {
            println!("{} Error diagnostic observed: {}", "watch".cyan().bold(), line.trim());
            print_resolution(&resolution);
            summary.passes += 1;
        }
    }

    Ok(summary)
}
