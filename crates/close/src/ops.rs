//! Entry points for closing a resource at the end of a function
//!
//! Each function is a fixed [`Policy`] over [`reconcile`]:
//!
//! | function | runs when | cleanup error goes to |
//! |---|---|---|
//! | [`close`] | always | the slot if it is clean, the log otherwise |
//! | [`close_and_log`] | always | the log |
//! | [`close_on_error`] | the slot already failed | the log |
//! | [`close_void_on_error`] | `failed` is true | the log |
//!
//! The `*_on_error` variants leave the resource open when the body
//! succeeded. Closing it on the success path is the caller's job.

use crate::policy::{reconcile, Policy, Reconciled};
use crate::slot::OutcomeSlot;
use std::fmt::Display;

/// Close a resource, keeping the first error seen
///
/// If `slot` already failed, a cleanup error is logged with `message` and the
/// slot keeps its error. Otherwise the cleanup error is written into `slot`.
///
/// ```
/// use std::io;
///
/// fn flush_all(buffers: &mut Vec<Vec<u8>>) -> io::Result<usize> {
///     let mut outcome = Ok(buffers.len());
///     closer::close(&mut outcome, || {
///         buffers.clear();
///         Ok::<(), io::Error>(())
///     }, "releasing buffers");
///     outcome
/// }
///
/// assert_eq!(flush_all(&mut vec![vec![1], vec![2]]).unwrap(), 2);
/// ```
pub fn close<S, C, F>(slot: &mut S, cleanup: F, message: &str)
where
    S: OutcomeSlot,
    F: FnOnce() -> Result<(), C>,
    C: Into<S::Error> + Display,
{
    reconcile_into(Policy::CLOSE, slot, cleanup, message);
}

/// Close a resource and log any error; nothing is returned
pub fn close_and_log<C, F>(cleanup: F, message: &str)
where
    F: FnOnce() -> Result<(), C>,
    C: Display,
{
    let _ = reconcile(Policy::CLOSE_AND_LOG, false, cleanup, message);
}

/// Close a resource only if `slot` already holds an error
///
/// The slot's error is kept and a cleanup error is logged. When the slot is
/// clean the cleanup is not invoked.
pub fn close_on_error<S, C, F>(slot: &mut S, cleanup: F, message: &str)
where
    S: OutcomeSlot,
    F: FnOnce() -> Result<(), C>,
    C: Into<S::Error> + Display,
{
    reconcile_into(Policy::CLOSE_ON_ERROR, slot, cleanup, message);
}

/// Close a resource only if the enclosing function `failed`
///
/// For callers whose outcome cannot carry the cleanup error, so it is
/// always logged.
pub fn close_void_on_error<C, F>(failed: bool, cleanup: F, message: &str)
where
    F: FnOnce() -> Result<(), C>,
    C: Display,
{
    let _ = reconcile(Policy::CLOSE_VOID_ON_ERROR, failed, cleanup, message);
}

pub(crate) fn reconcile_into<S, C, F>(policy: Policy, slot: &mut S, cleanup: F, message: &str)
where
    S: OutcomeSlot,
    F: FnOnce() -> Result<(), C>,
    C: Into<S::Error> + Display,
{
    if let Reconciled::Surfaced(err) = reconcile(policy, slot.has_failed(), cleanup, message) {
        slot.fail(err.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture;
    use std::cell::Cell;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    type Slot = Result<&'static str, String>;

    fn fail_with(msg: &'static str) -> impl FnOnce() -> Result<(), String> {
        move || Err(msg.to_string())
    }

    fn succeed() -> Result<(), String> {
        Ok(())
    }

    #[test]
    fn test_close_keeps_body_error_and_logs_cleanup_error() {
        let mut slot: Slot = Err("E1".to_string());
        let ((), records) = capture(|| close(&mut slot, fail_with("E2"), "closing db"));

        assert_eq!(slot, Err("E1".to_string()));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "closing db");
        assert_eq!(records[0].error.as_deref(), Some("E2"));
    }

    #[test]
    fn test_close_surfaces_into_clean_slot() {
        let mut slot: Slot = Ok("rows");
        let ((), records) = capture(|| close(&mut slot, fail_with("E2"), "closing db"));

        assert_eq!(slot, Err("E2".to_string()));
        assert!(records.is_empty());
    }

    #[test]
    fn test_close_with_option_slot() {
        let mut slot: Option<String> = None;
        let ((), records) = capture(|| close(&mut slot, fail_with("E2"), "closing db"));
        assert_eq!(slot.as_deref(), Some("E2"));
        assert!(records.is_empty());
    }

    #[test]
    fn test_successful_cleanup_leaves_slot_untouched() {
        let mut ok_slot: Slot = Ok("rows");
        let mut err_slot: Slot = Err("E1".to_string());

        let ((), records) = capture(|| {
            close(&mut ok_slot, succeed, "a");
            close(&mut err_slot, succeed, "b");
            close_and_log(succeed, "c");
            close_on_error(&mut err_slot, succeed, "d");
            close_void_on_error(true, succeed, "e");
        });

        assert_eq!(ok_slot, Ok("rows"));
        assert_eq!(err_slot, Err("E1".to_string()));
        assert!(records.is_empty());
    }

    #[test]
    fn test_close_and_log_always_logs_once() {
        let ((), records) = capture(|| close_and_log(fail_with("E2"), "closing socket"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "closing socket");
        assert_eq!(records[0].error.as_deref(), Some("E2"));
    }

    #[test]
    fn test_close_on_error_keeps_body_error() {
        let mut slot: Slot = Err("E1".to_string());
        let ((), records) = capture(|| close_on_error(&mut slot, fail_with("E2"), "rollback"));

        assert_eq!(slot, Err("E1".to_string()));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].error.as_deref(), Some("E2"));
    }

    #[test]
    fn test_close_on_error_does_not_run_after_success() {
        let calls = Cell::new(0);
        let mut slot: Slot = Ok("rows");
        close_on_error(
            &mut slot,
            || {
                calls.set(calls.get() + 1);
                Err::<(), _>("E2".to_string())
            },
            "rollback",
        );
        assert_eq!(calls.get(), 0);
        assert_eq!(slot, Ok("rows"));
    }

    #[test]
    fn test_close_void_on_error() {
        let calls = Cell::new(0);
        let cleanup = || {
            calls.set(calls.get() + 1);
            Err::<(), _>("E2")
        };

        let ((), records) = capture(|| close_void_on_error(false, cleanup, "unlock"));
        assert_eq!(calls.get(), 0);
        assert!(records.is_empty());

        let ((), records) = capture(|| close_void_on_error(true, cleanup, "unlock"));
        assert_eq!(calls.get(), 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "unlock");
        assert_eq!(records[0].error.as_deref(), Some("E2"));
    }

    #[test]
    fn test_cleanup_panic_propagates_before_any_change() {
        let mut slot: Slot = Ok("rows");
        let (result, records) = capture(|| {
            catch_unwind(AssertUnwindSafe(|| {
                close(
                    &mut slot,
                    || -> Result<(), String> { panic!("close handler bug") },
                    "closing db",
                )
            }))
        });

        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"close handler bug"));
        assert_eq!(slot, Ok("rows"));
        assert!(records.is_empty());
    }

    #[test]
    fn test_every_entry_point_propagates_panics() {
        fn boom() -> Result<(), String> {
            panic!("boom")
        }

        let mut slot: Option<String> = Some("E1".to_string());
        assert!(catch_unwind(AssertUnwindSafe(|| close_and_log(boom, "x"))).is_err());
        assert!(catch_unwind(AssertUnwindSafe(|| close_on_error(&mut slot, boom, "x"))).is_err());
        assert!(catch_unwind(AssertUnwindSafe(|| close_void_on_error(true, boom, "x"))).is_err());
        assert_eq!(slot.as_deref(), Some("E1"));
    }

    #[test]
    fn test_calling_twice_closes_twice() {
        let calls = Cell::new(0);
        let cleanup = || {
            calls.set(calls.get() + 1);
            Ok::<(), String>(())
        };
        close_and_log(cleanup, "first");
        close_and_log(cleanup, "second");
        assert_eq!(calls.get(), 2);
    }
}
