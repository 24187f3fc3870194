//! # usher — priority-routed chat event dispatch
//!
//! Usher receives inbound chat events, decides which of many independent
//! handlers should act on each, and executes the matches under a shared
//! middleware pipeline with permission resolution and rate limiting.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use usher::prelude::*;
//!
//! struct Ping;
//!
//! impl Handler for Ping {
//!     async fn matches(&self, ctx: &Context) -> bool {
//!         ctx.text() == "/ping"
//!     }
//!     async fn handle(&self, _ctx: &mut Context) -> Result<(), DispatchError> {
//!         Ok(())
//!     }
//! }
//!
//! let router = Router::new();
//! router.layer(usher::middleware::CatchPanic);
//! router.register(Ping);
//!
//! let mut ctx = Context::new(Event::new(sender, scope, "/ping"));
//! router.route(&mut ctx).await?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use usher_core::{
    // Collaborator interfaces
    AuthorityStore,
    // Errors
    BoxError,
    BoxFuture,
    // Context
    Context,
    DispatchError,
    DynHandler,
    Event,
    FeatureGate,
    GLOBAL_SCOPE,
    // Middleware chain
    HandlerFn,
    // Handler contract
    Handler,
    Middleware,
    // Permission model
    Permission,
    PermissionSet,
    // Router
    Router,
    compose,
    handler_fn,
    priority,
};

pub use usher_std::limit::{LimiterConfig, RateLimiter};

/// Stock middleware layers.
pub mod middleware {
    pub use usher_std::middleware::{Authorize, CatchPanic, Throttle, Timeout, Trace};
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use usher_std::testing::*;
}

/// Prelude module - common imports for Usher.
///
/// # Usage
///
/// ```rust,ignore
/// use usher::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Context, DispatchError, Event, Handler, Middleware, Permission, PermissionSet,
        RateLimiter, Router, priority,
    };
}
