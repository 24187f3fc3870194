//! # usher-core
//!
//! Core traits and value types for the Usher message dispatch engine.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! feature crates that don't need the stock middleware in `usher-std`.
//!
//! # Dispatch Model
//!
//! One inbound chat event is wrapped into a [`Context`] and handed to the
//! [`Router`]. The router walks its registered [`Handler`]s in ascending
//! priority order, asks each whether it matches, and runs every match
//! through the composed [`Middleware`] chain before invoking the handler's
//! business logic. The handler's continue flag decides whether dispatch
//! keeps scanning afterwards.
//!
//! ## Components
//!
//! - [`Permission`] / [`PermissionSet`] — ordered authority ranks with
//!   two-tier (global + scope) resolution
//! - [`Context`] — per-event carrier with a lazily allocated value store
//! - [`Handler`] — the four-operation contract every feature implements
//! - [`Middleware`] — decorator composition of cross-cutting concerns
//! - [`Router`] — the priority-ordered registry and dispatch algorithm
//! - [`AuthorityStore`] / [`FeatureGate`] — collaborator interfaces for
//!   the storage this engine deliberately does not own
//!
//! # Error Types
//!
//! - [`DispatchError`] — everything a dispatch can fail with
//! - [`BoxError`] — boxed dynamic errors at the handler boundary

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod context;
mod error;
mod event;
mod handler;
mod middleware;
mod permission;
mod router;
mod store;

// Re-exports
pub use context::Context;
pub use error::{BoxError, DispatchError};
pub use event::Event;
pub use handler::{BoxFuture, DynHandler, Handler, priority};
pub use middleware::{HandlerFn, Middleware, compose, handler_fn};
pub use permission::{GLOBAL_SCOPE, Permission, PermissionSet};
pub use router::Router;
pub use store::{AuthorityStore, FeatureGate};
