//! Error types for Usher.
//!
//! The router never invents errors of its own; [`DispatchError`] is the
//! taxonomy of what handlers and middleware layers may produce and the
//! router relays:
//!
//! - [`DispatchError::Handler`] — a feature's business failure, relayed
//!   verbatim to the caller
//! - [`DispatchError::Denied`] — rate-limit rejection, produced by limiter
//!   middleware before the handler runs
//! - [`DispatchError::Forbidden`] — authority insufficiency, carrying both
//!   ranks for user-facing messaging
//! - [`DispatchError::Timeout`] / [`DispatchError::Panicked`] — produced
//!   only by the optional deadline and recovery middleware layers

use crate::permission::Permission;
use std::time::Duration;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything a dispatch can fail with.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A handler's business logic failed.
    #[error("handler failed: {0}")]
    Handler(#[source] BoxError),

    /// The caller is over their rate-limit quota.
    #[error("rate limited: caller {caller} is over quota")]
    Denied {
        /// The caller that was denied.
        caller: i64,
    },

    /// The caller's rank does not meet the handler's requirement.
    #[error("insufficient rank: need {required}, have {actual}")]
    Forbidden {
        /// The rank the operation requires.
        required: Permission,
        /// The caller's effective rank in the event's scope.
        actual: Permission,
    },

    /// A handler exceeded the deadline imposed by timeout middleware.
    #[error("handler timed out after {0:?}")]
    Timeout(Duration),

    /// A handler panicked and recovery middleware caught it.
    #[error("handler panicked: {0}")]
    Panicked(String),
}

impl DispatchError {
    /// Wrap an arbitrary business error as a handler failure.
    pub fn handler(err: impl Into<BoxError>) -> Self {
        DispatchError::Handler(err.into())
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Handler(err)
    }
}
