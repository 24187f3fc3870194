//! Deadline middleware.
//!
//! The router enforces no timeout of its own; cancellation is cooperative.
//! This layer supplies the deadline by dropping the handler's future when it
//! runs over.

use std::sync::Arc;
use std::time::Duration;
use usher_core::{DispatchError, HandlerFn, Middleware};

/// Middleware that fails a handler with [`DispatchError::Timeout`] when it
/// exceeds the configured duration.
pub struct Timeout {
    duration: Duration,
}

impl Timeout {
    /// Deadline applied to every wrapped invocation.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl Middleware for Timeout {
    fn wrap(self: Arc<Self>, next: HandlerFn) -> HandlerFn {
        Arc::new(move |ctx| {
            let next = Arc::clone(&next);
            let duration = self.duration;
            Box::pin(async move {
                match tokio::time::timeout(duration, (next)(ctx)).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(DispatchError::Timeout(duration)),
                }
            })
        })
    }
}
