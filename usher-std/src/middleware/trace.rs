//! Tracing middleware for dispatch observation.

use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use usher_core::{HandlerFn, Middleware};

/// Middleware that runs each handler inside a `tracing` span and logs the
/// outcome with elapsed time.
pub struct Trace;

impl Middleware for Trace {
    fn wrap(self: Arc<Self>, next: HandlerFn) -> HandlerFn {
        Arc::new(move |ctx| {
            let next = Arc::clone(&next);
            let span = tracing::debug_span!("dispatch", sender = ctx.sender(), scope = ctx.scope());
            Box::pin(
                async move {
                    let start = Instant::now();
                    let outcome = (next)(ctx).await;
                    match &outcome {
                        Ok(()) => tracing::debug!(elapsed = ?start.elapsed(), "handler completed"),
                        Err(err) => {
                            tracing::debug!(elapsed = ?start.elapsed(), %err, "handler failed");
                        }
                    }
                    outcome
                }
                .instrument(span),
            )
        })
    }
}
