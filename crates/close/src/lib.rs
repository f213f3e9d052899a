//! Helpers for closing a resource during function cleanup
//!
//! A function that obtains a resource with a closing callback has to run the
//! callback on every exit and decide what to do when the close fails. This
//! crate settles that decision the same way everywhere: when both the body
//! and the close fail, the body's error is returned and the close error is
//! logged through `tracing`. Panics from a close callback are never caught.
//!
//! - [`close`], [`close_and_log`], [`close_on_error`], [`close_void_on_error`]
//!   are the entry points, each a fixed [`Policy`] over [`reconcile`].
//! - [`CloseGuard`] runs the callback from `Drop` so early returns and
//!   unwinding close the resource too.
//! - [`configure`] sets the level of logged close failures.

pub mod guard;
pub mod ops;
pub mod policy;
pub mod settings;
pub mod slot;

#[cfg(test)]
#[path = "../tests/common/mod.rs"]
pub(crate) mod test_support;

pub use closer_core::{CloseResultExt, Error, LogLevel, Result, Settings};
pub use guard::CloseGuard;
pub use ops::{close, close_and_log, close_on_error, close_void_on_error};
pub use policy::{reconcile, Policy, Reconciled, Surfacing, Timing};
pub use settings::{configure, settings};
pub use slot::OutcomeSlot;
