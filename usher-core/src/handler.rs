//! # Handler Contract
//!
//! The abstraction every feature implements.
//!
//! A handler is polymorphic over four operations: a pure match predicate, the
//! business-logic effect, a dispatch priority, and a continue flag telling
//! the router whether lower-priority handlers may still run after it.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Handler`] uses native `async fn`-style methods for zero-cost static
//! dispatch. The router's registry needs runtime polymorphism, so the
//! object-safe [`DynHandler`] mirror exists alongside it with a blanket
//! implementation; implement `Handler` and registration does the rest.

use crate::context::Context;
use crate::error::DispatchError;
use std::{future::Future, pin::Pin};

/// A boxed future, used at the dynamic-dispatch seams.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Priority bands reserved by handler category.
///
/// These are a registration convention, not an enforced constraint: lower
/// runs earlier, and anything between the bands is legal.
pub mod priority {
    /// System-level handlers (captchas, raid protection); run first.
    pub const SYSTEM: i32 = 0;
    /// Explicit-trigger command handlers.
    pub const COMMAND: i32 = 100;
    /// Fuzzy/pattern handlers.
    pub const PATTERN: i32 = 500;
    /// Passive observers; run last.
    pub const OBSERVER: i32 = 1000;
}

/// The contract every feature implements.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a Handler",
    label = "missing `Handler` implementation",
    note = "Handlers must provide `matches` and `handle`; `priority` and `continue_chain` have defaults."
)]
pub trait Handler: Send + Sync + 'static {
    /// Whether this handler wants the event.
    ///
    /// Must be side-effect-free apart from external lookups (e.g., a
    /// feature-enablement check for the event's scope) and must not mutate
    /// the context.
    fn matches(&self, ctx: &Context) -> impl Future<Output = bool> + Send;

    /// Perform the feature's effect. May mutate the context's value store to
    /// pass data to later handlers in the same dispatch.
    fn handle(&self, ctx: &mut Context) -> impl Future<Output = Result<(), DispatchError>> + Send;

    /// Dispatch priority; lower runs earlier. See [`priority`] for the
    /// conventional bands.
    fn priority(&self) -> i32 {
        priority::COMMAND
    }

    /// Whether the router should keep evaluating lower-priority handlers
    /// after this one runs. Defaults to `false`: most features consume the
    /// event they matched.
    fn continue_chain(&self) -> bool {
        false
    }
}

/// Object-safe mirror of [`Handler`] for the router's registry.
///
/// Implemented automatically for every `Handler`; implement it directly only
/// when you need manual control over the boxed futures.
pub trait DynHandler: Send + Sync + 'static {
    /// Dynamic-dispatch version of [`Handler::matches`].
    fn matches_dyn<'a>(&'a self, ctx: &'a Context) -> BoxFuture<'a, bool>;

    /// Dynamic-dispatch version of [`Handler::handle`].
    fn handle_dyn<'a>(&'a self, ctx: &'a mut Context) -> BoxFuture<'a, Result<(), DispatchError>>;

    /// See [`Handler::priority`].
    fn priority(&self) -> i32;

    /// See [`Handler::continue_chain`].
    fn continue_chain(&self) -> bool;
}

// Blanket implementation: any Handler is a DynHandler.
impl<T: Handler> DynHandler for T {
    fn matches_dyn<'a>(&'a self, ctx: &'a Context) -> BoxFuture<'a, bool> {
        Box::pin(self.matches(ctx))
    }

    fn handle_dyn<'a>(&'a self, ctx: &'a mut Context) -> BoxFuture<'a, Result<(), DispatchError>> {
        Box::pin(self.handle(ctx))
    }

    fn priority(&self) -> i32 {
        Handler::priority(self)
    }

    fn continue_chain(&self) -> bool {
        Handler::continue_chain(self)
    }
}
