//! Authority-check middleware.
//!
//! Handlers normally consult the permission model themselves so they can
//! produce feature-specific messages; this layer is the coarse variant for
//! wiring a whole router (or a privileged sub-router) behind one rank.

use std::sync::Arc;
use usher_core::{AuthorityStore, DispatchError, HandlerFn, Middleware, Permission};

/// Middleware that requires the sender's effective rank in the event's scope
/// to meet `required`, failing with [`DispatchError::Forbidden`] otherwise.
pub struct Authorize<S> {
    store: Arc<S>,
    required: Permission,
}

impl<S: AuthorityStore> Authorize<S> {
    /// Require `required` of every dispatched event, resolving ranks via
    /// `store`.
    pub fn new(store: Arc<S>, required: Permission) -> Self {
        Self { store, required }
    }
}

impl<S: AuthorityStore> Middleware for Authorize<S> {
    fn wrap(self: Arc<Self>, next: HandlerFn) -> HandlerFn {
        Arc::new(move |ctx| {
            let this = Arc::clone(&self);
            let next = Arc::clone(&next);
            Box::pin(async move {
                let set = this.store.load(ctx.sender()).await;
                let actual = set.effective(ctx.scope());
                if actual < this.required {
                    return Err(DispatchError::Forbidden {
                        required: this.required,
                        actual,
                    });
                }
                (next)(ctx).await
            })
        })
    }
}
