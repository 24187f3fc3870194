//! # Router
//!
//! The priority-ordered dispatch engine.
//!
//! The router owns a registry of handlers and a middleware chain behind a
//! single mutex. One dispatch walks the registry in ascending priority order:
//! non-matching handlers are skipped; a matching handler's `handle` is
//! wrapped in the full middleware chain and invoked; its
//! [`continue_chain`](crate::Handler::continue_chain) flag decides whether
//! the scan keeps going.
//!
//! # Concurrency
//!
//! [`Router::route`] may run concurrently for distinct events, and
//! [`Router::register`] / [`Router::layer`] may run concurrently with
//! in-flight dispatches: each dispatch takes a copy-on-read snapshot of the
//! registry and chain under the lock, so no dispatch ever observes a registry
//! mutated mid-flight. New registrations take effect only for dispatches that
//! start afterwards.
//!
//! # Errors
//!
//! The router never invents errors; it only relays handler outcomes. A panic
//! inside a handler is not caught here — install recovery middleware (see
//! `usher-std`) if one failing handler must not poison the dispatching task.

use crate::context::Context;
use crate::error::DispatchError;
use crate::handler::{DynHandler, Handler};
use crate::middleware::{Middleware, compose, handler_fn};
use std::sync::{Arc, Mutex, MutexGuard};

/// One registry entry: the handler plus its priority and continue flag,
/// cached at registration time.
#[derive(Clone)]
struct Registration {
    handler: Arc<dyn DynHandler>,
    priority: i32,
    keep_going: bool,
}

#[derive(Default)]
struct Inner {
    handlers: Vec<Registration>,
    chain: Vec<Arc<dyn Middleware>>,
}

/// Registry plus dispatch algorithm over [`Handler`]s and [`Middleware`].
#[derive(Default)]
pub struct Router {
    inner: Mutex<Inner>,
}

impl Router {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler.
    ///
    /// The registry is re-sorted by ascending priority after every
    /// registration; the sort is stable, so registration order is the
    /// tie-break between equal priorities. Registration is rare relative to
    /// dispatch, so the O(n log n) re-sort is acceptable.
    pub fn register<H: Handler>(&self, handler: H) {
        self.register_dyn(Arc::new(handler));
    }

    /// Register an already-boxed handler.
    pub fn register_dyn(&self, handler: Arc<dyn DynHandler>) {
        let registration = Registration {
            priority: handler.priority(),
            keep_going: handler.continue_chain(),
            handler,
        };
        let mut inner = self.lock();
        inner.handlers.push(registration);
        inner.handlers.sort_by_key(|r| r.priority);
    }

    /// Append a middleware layer to the end of the wrapper chain.
    ///
    /// The first layer added wraps outermost; see
    /// [`compose`](crate::compose).
    pub fn layer<M: Middleware>(&self, middleware: M) {
        self.lock().chain.push(Arc::new(middleware));
    }

    /// The number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.lock().handlers.len()
    }

    /// The priorities of the registered handlers, in registry order.
    ///
    /// Always ascending; exposed for diagnostics.
    pub fn priorities(&self) -> Vec<i32> {
        self.lock().handlers.iter().map(|r| r.priority).collect()
    }

    /// Dispatch one event.
    ///
    /// Scans the snapshot in priority order. A matching handler runs through
    /// the middleware chain; if its continue flag is false its outcome is
    /// authoritative and is returned immediately, even when `Ok`. A
    /// continuing handler's error is recorded as the last error seen but
    /// never aborts the scan — passive observers must not block feature
    /// handlers from running. No match at all is `Ok(())`.
    pub async fn route(&self, ctx: &mut Context) -> Result<(), DispatchError> {
        let (handlers, chain) = {
            let inner = self.lock();
            (inner.handlers.clone(), inner.chain.clone())
        };

        let mut last = Ok(());
        for registration in &handlers {
            if !registration.handler.matches_dyn(ctx).await {
                continue;
            }

            let wrapped = compose(&chain, handler_fn(Arc::clone(&registration.handler)));
            let outcome = (wrapped)(&mut *ctx).await;

            if !registration.keep_going {
                return outcome;
            }
            if outcome.is_err() {
                last = outcome;
            }
        }
        last
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Registry mutations cannot leave the Vec in an invalid state, so a
        // poisoned lock is still safe to reuse.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
