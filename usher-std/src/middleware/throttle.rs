//! Rate-limiting middleware.

use crate::limit::RateLimiter;
use std::sync::Arc;
use usher_core::{DispatchError, HandlerFn, Middleware};

/// Middleware that consults a [`RateLimiter`] with the event's sender id
/// before the handler ever runs.
///
/// Denial is [`DispatchError::Denied`] — distinct from a handler error, so
/// callers can translate it into a user-facing "slow down" message.
pub struct Throttle {
    limiter: RateLimiter,
}

impl Throttle {
    /// Gate dispatch on the given limiter.
    pub fn new(limiter: RateLimiter) -> Self {
        Self { limiter }
    }
}

impl Middleware for Throttle {
    fn wrap(self: Arc<Self>, next: HandlerFn) -> HandlerFn {
        Arc::new(move |ctx| {
            let this = Arc::clone(&self);
            let next = Arc::clone(&next);
            Box::pin(async move {
                let caller = ctx.sender();
                if !this.limiter.allow(caller) {
                    tracing::debug!(caller, "dispatch denied by rate limiter");
                    return Err(DispatchError::Denied { caller });
                }
                (next)(ctx).await
            })
        })
    }
}
