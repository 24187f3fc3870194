//! Panic recovery middleware.
//!
//! The router itself never catches panics; installing this layer outermost
//! keeps one failing handler from taking down the task that dispatches
//! subsequent independent events.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use usher_core::{DispatchError, HandlerFn, Middleware};

/// Middleware that converts a handler panic into
/// [`DispatchError::Panicked`].
pub struct CatchPanic;

impl Middleware for CatchPanic {
    fn wrap(self: Arc<Self>, next: HandlerFn) -> HandlerFn {
        Arc::new(move |ctx| {
            let next = Arc::clone(&next);
            Box::pin(async move {
                match AssertUnwindSafe((next)(ctx)).catch_unwind().await {
                    Ok(outcome) => outcome,
                    Err(payload) => {
                        let message = panic_message(payload.as_ref());
                        tracing::warn!(%message, "handler panicked");
                        Err(DispatchError::Panicked(message))
                    }
                }
            })
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "opaque panic payload".to_string()
    }
}
