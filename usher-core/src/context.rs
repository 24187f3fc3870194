//! # Execution Context
//!
//! The per-event carrier handed through one dispatch.
//!
//! A [`Context`] wraps the immutable [`Event`] metadata and a mutable,
//! string-keyed value store that handlers use to pass data forward within
//! the same dispatch (e.g., a parser handler leaving a parsed command for a
//! later observer). The store is lazily allocated on first [`Context::set`],
//! keeping the common case — no cross-handler data — allocation-free.
//!
//! # Concurrency
//!
//! A `Context` provides no synchronization of its own. It is exclusively
//! owned by the dispatch of one event; the router never shares one instance
//! across concurrently executing handlers.

use crate::event::Event;
use std::any::Any;
use std::collections::HashMap;

type ValueStore = HashMap<String, Box<dyn Any + Send + Sync>>;

/// Per-event mutable carrier: event metadata plus an extensible value store.
pub struct Context {
    event: Event,
    values: Option<ValueStore>,
}

impl Context {
    /// Wrap an inbound event for dispatch.
    pub fn new(event: Event) -> Self {
        Self {
            event,
            values: None,
        }
    }

    /// The immutable event metadata.
    pub fn event(&self) -> &Event {
        &self.event
    }

    /// Shorthand for the sender's caller id.
    pub fn sender(&self) -> i64 {
        self.event.sender()
    }

    /// Shorthand for the event's scope id.
    pub fn scope(&self) -> i64 {
        self.event.scope()
    }

    /// Shorthand for the raw message text.
    pub fn text(&self) -> &str {
        self.event.text()
    }

    /// Store a typed value under `key`, allocating the store on first use.
    ///
    /// A later `set` with the same key replaces the previous value.
    pub fn set<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.values
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), Box::new(value));
    }

    /// Fetch the value stored under `key`, if present and of type `T`.
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
        self.values
            .as_ref()
            .and_then(|values| values.get(key))
            .and_then(|value| value.downcast_ref())
    }

    /// Whether any value is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.values
            .as_ref()
            .is_some_and(|values| values.contains_key(key))
    }

    /// Remove and return the value stored under `key`, if it has type `T`.
    pub fn remove<T: Any + Send + Sync>(&mut self, key: &str) -> Option<T> {
        let values = self.values.as_mut()?;
        if !values.get(key).is_some_and(|v| v.is::<T>()) {
            return None;
        }
        values
            .remove(key)
            .and_then(|value| value.downcast().ok())
            .map(|boxed| *boxed)
    }
}
