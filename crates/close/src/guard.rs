//! RAII guard that closes a resource on every exit path
//!
//! The free functions in [`crate::ops`] run at a point the caller picks.
//! [`CloseGuard`] ties the cleanup to scope instead: the normal path hands
//! the outcome to [`CloseGuard::finish`] or [`CloseGuard::complete`], and any
//! other exit (an early `?` return or a panic) drops the guard, which closes
//! the resource and logs a failure, since the function is already leaving
//! with an error of its own.

use crate::ops::reconcile_into;
use crate::policy::{reconcile, Policy};
use crate::slot::OutcomeSlot;
use std::borrow::Cow;
use std::fmt::Display;
use std::marker::PhantomData;

/// Scoped close guard that runs a cleanup action exactly once
#[must_use = "dropping the guard closes the resource immediately"]
pub struct CloseGuard<F, C>
where
    F: FnOnce() -> Result<(), C>,
    C: Display,
{
    cleanup: Option<F>,
    message: Cow<'static, str>,
    policy: Policy,
    _error: PhantomData<fn() -> C>,
}

impl<F, C> CloseGuard<F, C>
where
    F: FnOnce() -> Result<(), C>,
    C: Display,
{
    /// Guard that closes on every exit, following [`Policy::CLOSE`]
    pub fn new(cleanup: F, message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_policy(Policy::CLOSE, cleanup, message)
    }

    /// Guard that closes only on the error path, following [`Policy::CLOSE_ON_ERROR`]
    ///
    /// The timing rule applies only through [`finish`](Self::finish) and
    /// [`complete`](Self::complete). Dropping the guard always runs the
    /// cleanup, so on the success path call `finish`, `into_inner` or
    /// `cancel` before the guard goes out of scope.
    pub fn on_error(cleanup: F, message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_policy(Policy::CLOSE_ON_ERROR, cleanup, message)
    }

    pub fn with_policy(policy: Policy, cleanup: F, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            cleanup: Some(cleanup),
            message: message.into(),
            policy,
            _error: PhantomData,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Reconcile the cleanup against `slot` using the guard's policy
    ///
    /// Returns the cleanup action unrun when the policy skipped it, so an
    /// on-error guard can hand the resource back on the success path.
    pub fn finish<S>(mut self, slot: &mut S) -> Option<F>
    where
        S: OutcomeSlot,
        C: Into<S::Error>,
    {
        let cleanup = self.cleanup.take()?;
        if !self.policy.should_run(slot.has_failed()) {
            return Some(cleanup);
        }
        reconcile_into(self.policy, slot, cleanup, &self.message);
        None
    }

    /// Reconcile the cleanup against `outcome` and return it
    ///
    /// A cleanup skipped by the policy is dropped without running.
    pub fn complete<T, E>(self, mut outcome: Result<T, E>) -> Result<T, E>
    where
        C: Into<E>,
    {
        let _ = self.finish(&mut outcome);
        outcome
    }

    /// Cancel the guard and take back the cleanup action without running it
    pub fn into_inner(mut self) -> Option<F> {
        self.cleanup.take()
    }

    /// Cancel the guard; the cleanup action never runs
    pub fn cancel(mut self) {
        self.cleanup = None;
    }
}

impl<F, C> Drop for CloseGuard<F, C>
where
    F: FnOnce() -> Result<(), C>,
    C: Display,
{
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            // Leaving without an outcome means the body failed.
            let _ = reconcile(Policy::CLOSE_AND_LOG, true, cleanup, &self.message);
        }
    }
}
