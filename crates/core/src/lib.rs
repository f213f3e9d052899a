//! Core errors, settings, and constants for the `closer` workspace.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum and `Result` alias, plus `CloseResultExt`
//!   for attaching a description to a failed close.
//! - **`settings`**: the level at which demoted close failures are logged.
//! - **`constants`**: environment variable names and the tracing target.

pub mod constants;
pub mod errors;
pub mod settings;

pub use self::{
    constants::*,
    errors::{BoxError, CloseResultExt, Error, Result},
    settings::{LogLevel, Settings},
};
