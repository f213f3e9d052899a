//! The run-and-reconcile primitive shared by every entry point
//!
//! A [`Policy`] answers two questions about a cleanup action: may its error
//! replace the function's outcome ([`Surfacing`]), and should it run at all
//! when the body succeeded ([`Timing`]). [`reconcile`] runs the action once and
//! applies the answers. A panic from the action is never caught.

use crate::settings::settings;
use closer_core::{LogLevel, LOG_TARGET};
use std::fmt::Display;

/// Whether a cleanup error may become the function's error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surfacing {
    /// Written into a clean outcome; logged when the outcome already failed
    Override,
    /// Always logged, never written anywhere
    LogOnly,
}

/// When the cleanup action runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    /// On every exit
    Always,
    /// Only when the body already failed
    OnPriorError,
}

/// How a cleanup error is reconciled with the function's outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub surfacing: Surfacing,
    pub timing: Timing,
}

impl Policy {
    /// Close on every exit; the cleanup error is returned unless the body failed first
    pub const CLOSE: Policy = Policy::new(Surfacing::Override, Timing::Always);
    /// Close on every exit; the cleanup error is only logged
    pub const CLOSE_AND_LOG: Policy = Policy::new(Surfacing::LogOnly, Timing::Always);
    /// Close only after the body failed; the body error is kept
    pub const CLOSE_ON_ERROR: Policy = Policy::new(Surfacing::Override, Timing::OnPriorError);
    /// Close only after the body failed, for outcomes that cannot carry the cleanup error
    pub const CLOSE_VOID_ON_ERROR: Policy = Policy::new(Surfacing::LogOnly, Timing::OnPriorError);

    pub const fn new(surfacing: Surfacing, timing: Timing) -> Self {
        Self { surfacing, timing }
    }

    /// Whether the cleanup action runs given the body's outcome
    pub fn should_run(self, prior_failed: bool) -> bool {
        match self.timing {
            Timing::Always => true,
            Timing::OnPriorError => prior_failed,
        }
    }
}

/// What [`reconcile`] did with a cleanup action
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a surfaced cleanup error must be stored in the outcome"]
pub enum Reconciled<C> {
    /// The timing rule skipped the action
    Skipped,
    /// The action ran and succeeded
    Closed,
    /// The action failed and its error was logged
    Logged,
    /// The action failed and its error must become the outcome
    Surfaced(C),
}

impl<C> Reconciled<C> {
    /// Whether the cleanup action was invoked
    pub fn ran(&self) -> bool {
        !matches!(self, Reconciled::Skipped)
    }

    pub fn into_surfaced(self) -> Option<C> {
        match self {
            Reconciled::Surfaced(err) => Some(err),
            _ => None,
        }
    }
}

/// Run `cleanup` under `policy` and decide where its error goes
///
/// `prior_failed` tells whether the enclosing function already holds an
/// error. When it does, that error wins and a cleanup error is only logged.
pub fn reconcile<C, F>(policy: Policy, prior_failed: bool, cleanup: F, message: &str) -> Reconciled<C>
where
    F: FnOnce() -> Result<(), C>,
    C: Display,
{
    if !policy.should_run(prior_failed) {
        return Reconciled::Skipped;
    }

    match cleanup() {
        Ok(()) => Reconciled::Closed,
        Err(err) if prior_failed || policy.surfacing == Surfacing::LogOnly => {
            log_close_failure(message, &err);
            Reconciled::Logged
        }
        Err(err) => Reconciled::Surfaced(err),
    }
}

fn log_close_failure(message: &str, err: &dyn Display) {
    match settings().log_level {
        LogLevel::Error => tracing::error!(target: LOG_TARGET, error = %err, "{message}"),
        LogLevel::Warn => tracing::warn!(target: LOG_TARGET, error = %err, "{message}"),
        LogLevel::Info => tracing::info!(target: LOG_TARGET, error = %err, "{message}"),
        LogLevel::Debug => tracing::debug!(target: LOG_TARGET, error = %err, "{message}"),
    }
}
