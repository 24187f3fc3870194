//! # usher-std
//!
//! Standard implementations for the Usher message dispatch engine.
//!
//! This crate provides:
//! - **Rate limiting**: [`limit::RateLimiter`], a concurrency-safe token
//!   bucket with sweep-based reclamation of idle callers
//! - **Stock middleware**: tracing/timing, panic recovery, deadlines,
//!   throttling and authority checks, all as
//!   [`Middleware`](usher_core::Middleware) layers
//! - **Testing utilities**: scripted handlers, journaling middleware and
//!   in-memory collaborator stores

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use usher_core;

// Modules
pub mod limit;
pub mod middleware;
pub mod testing;
