//! When to reconcile
//!
//! A host runs a pass at start-up, on demand, and once more after it first
//! reports an error-level diagnostic (a compile error is the usual symptom
//! of a missing git dependency). The error trigger is one-shot: it disarms
//! after firing and is only re-armed by the next start-up.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::reconcile::{Resolution, Resolve};

static ERROR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(error|fatal)\b").unwrap());
static WARNING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bwarn(ing)?\b").unwrap());

/// Severity of a host diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

impl DiagnosticLevel {
    /// Classify a raw log line.
    pub fn classify(line: &str) -> Self {
        if ERROR_PATTERN.is_match(line) {
            Self::Error
        } else if WARNING_PATTERN.is_match(line) {
            Self::Warning
        } else {
            Self::Info
        }
    }
}

/// Receives the outcome of every pass that rewrote the manifest.
pub trait ChangeNotifier {
    fn manifest_changed(&mut self, resolution: &Resolution) -> Result<()>;
}

impl<F> ChangeNotifier for F
where
    F: FnMut(&Resolution) -> Result<()>,
{
    fn manifest_changed(&mut self, resolution: &Resolution) -> Result<()> {
        self(resolution)
    }
}

/// Owns the trigger state for one host session.
pub struct ResolveTrigger<R, N> {
    resolver: R,
    notifier: N,
    armed: bool,
}

impl<R: Resolve, N: ChangeNotifier> ResolveTrigger<R, N> {
    pub fn new(resolver: R, notifier: N) -> Self {
        Self {
            resolver,
            notifier,
            armed: true,
        }
    }

    /// Host start-up: re-arm the error trigger and run a pass.
    pub fn startup(&mut self) -> Result<Resolution> {
        self.armed = true;
        self.run()
    }

    /// Explicit request from the user.
    pub fn manual(&mut self) -> Result<Resolution> {
        self.run()
    }

    /// Feed one host diagnostic. Runs a pass only for the first error while
    /// armed.
    pub fn diagnostic(&mut self, level: DiagnosticLevel) -> Result<Option<Resolution>> {
        if level != DiagnosticLevel::Error || !self.armed {
            return Ok(None);
        }
        self.armed = false;
        tracing::debug!("Error diagnostic observed, running one-shot reconciliation");
        self.run().map(Some)
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    fn run(&mut self) -> Result<Resolution> {
        let resolution = self.resolver.resolve()?;
        if resolution.manifest_changed() {
            self.notifier.manifest_changed(&resolution)?;
        }
        Ok(resolution)
    }
}
