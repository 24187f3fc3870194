//! # Middleware Chain
//!
//! Decorator-style composition of cross-cutting concerns.
//!
//! A middleware is a transform from the "next handler function" to a wrapped
//! handler function. [`compose`] folds a chain right-to-left over a terminal
//! handler so that the first-registered middleware wraps outermost:
//!
//! ```text
//! compose(&[m1, m2], terminal):
//!     m1-before → m2-before → terminal → m2-after → m1-after
//! ```
//!
//! The chain imposes no error semantics of its own — errors propagate up
//! through each wrapping layer, which may observe, log, or suppress them.

use crate::context::Context;
use crate::error::DispatchError;
use crate::handler::{BoxFuture, DynHandler};
use std::sync::Arc;

/// An invocable handler function: the unit middleware wraps and produces.
///
/// The `Arc` lets one composed chain be cloned into the futures it spawns;
/// the higher-ranked lifetime ties each invocation's future to the borrow of
/// the context it runs against.
pub type HandlerFn =
    Arc<dyn for<'a> Fn(&'a mut Context) -> BoxFuture<'a, Result<(), DispatchError>> + Send + Sync>;

/// A cross-cutting layer around handler invocation.
///
/// The `Arc<Self>` receiver keeps the trait object-safe while letting the
/// returned closure own a handle to the middleware's state.
pub trait Middleware: Send + Sync + 'static {
    /// Wrap `next`, returning the decorated handler function.
    fn wrap(self: Arc<Self>, next: HandlerFn) -> HandlerFn;
}

/// Compose a middleware chain over a terminal handler function.
///
/// Folds right-to-left: the first element of `chain` ends up outermost, so
/// registration order is nesting order.
pub fn compose(chain: &[Arc<dyn Middleware>], terminal: HandlerFn) -> HandlerFn {
    chain
        .iter()
        .rev()
        .fold(terminal, |next, middleware| Arc::clone(middleware).wrap(next))
}

/// Lift a handler into the terminal [`HandlerFn`] of a chain.
///
/// The router uses this for every match; it is also handy for invoking a
/// composed chain outside a router.
pub fn handler_fn(handler: Arc<dyn DynHandler>) -> HandlerFn {
    Arc::new(move |ctx| {
        let handler = Arc::clone(&handler);
        Box::pin(async move { handler.handle_dyn(ctx).await })
    })
}
