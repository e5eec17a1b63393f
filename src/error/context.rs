//! Error context utilities for modgraph
//!
//! Helpers for attaching context to foreign errors and for the one step of a run
//! that is allowed to fail softly (opening the viewer).

use crate::error::{ErrorSeverity, ModgraphError, Result};
use tracing::{error, warn};

/// Extension trait for Result to add context to errors
pub trait ResultExt<T, E> {
    /// Add context to an error with a custom message
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|err| ModgraphError::Config {
            message: format!("{}: {}", context(), err),
        })
    }
}

/// Handle an error based on its severity
///
/// Warnings are logged and swallowed; errors and critical errors are logged and
/// handed back to the caller.
pub fn handle_error(err: ModgraphError) -> Option<ModgraphError> {
    match err.severity() {
        ErrorSeverity::Warning => {
            warn!("{}", err.user_message());
            None
        }
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            error!("{}", err.user_message());
            Some(err)
        }
    }
}

/// Run a fallible step, tolerating warning-level failures
///
/// Returns `Ok(Some(value))` on success, `Ok(None)` when the step failed with a
/// warning, and `Err` for anything more severe.
pub fn try_with_recovery<T, F>(f: F) -> Result<Option<T>>
where
    F: FnOnce() -> Result<T>,
{
    match f() {
        Ok(value) => Ok(Some(value)),
        Err(err) => match handle_error(err) {
            Some(fatal) => Err(fatal),
            None => Ok(None),
        },
    }
}
