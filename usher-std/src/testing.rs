//! Testing utilities for Usher.
//!
//! This module provides doubles for the pieces surrounding a router:
//!
//! - [`Journal`]: a shared, ordered record of what ran
//! - [`ScriptedHandler`]: a configurable handler that journals its runs
//! - [`JournalingMiddleware`]: records before/after entries around the chain
//! - [`StaticAuthority`] / [`StaticGate`]: in-memory collaborator stores

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use usher_core::{
    AuthorityStore, BoxError, Context, DispatchError, FeatureGate, Handler, HandlerFn, Middleware,
    Permission, PermissionSet,
};

/// A shared, ordered record of labels, for asserting execution order.
#[derive(Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label.
    pub fn record(&self, label: impl Into<String>) {
        self.entries.lock().unwrap().push(label.into());
    }

    /// A clone of the recorded labels.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// The number of recorded labels.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

/// A handler scripted for tests: matches on an optional text prefix, runs at
/// a configurable priority, journals its name when handled, and can be told
/// to fail.
pub struct ScriptedHandler {
    name: String,
    prefix: Option<String>,
    priority: i32,
    keep_going: bool,
    fail_with: Option<String>,
    journal: Journal,
}

impl ScriptedHandler {
    /// A handler that matches every event and journals `name`.
    pub fn new(name: impl Into<String>, journal: Journal) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            priority: usher_core::priority::COMMAND,
            keep_going: false,
            fail_with: None,
            journal,
        }
    }

    /// Only match events whose text starts with `prefix`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the dispatch priority.
    pub fn at_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Let the router keep scanning after this handler runs.
    pub fn continuing(mut self) -> Self {
        self.keep_going = true;
        self
    }

    /// Fail with a handler error carrying `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }
}

impl Handler for ScriptedHandler {
    async fn matches(&self, ctx: &Context) -> bool {
        match &self.prefix {
            Some(prefix) => ctx.text().starts_with(prefix),
            None => true,
        }
    }

    async fn handle(&self, ctx: &mut Context) -> Result<(), DispatchError> {
        self.journal.record(self.name.clone());
        ctx.set(format!("ran:{}", self.name), true);
        match &self.fail_with {
            Some(message) => Err(DispatchError::handler(message.clone())),
            None => Ok(()),
        }
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn continue_chain(&self) -> bool {
        self.keep_going
    }
}

/// Middleware that journals `<label>-before` and `<label>-after` around the
/// rest of the chain. Compose two of these to assert nesting order.
pub struct JournalingMiddleware {
    label: String,
    journal: Journal,
}

impl JournalingMiddleware {
    /// Journal around the chain under `label`.
    pub fn new(label: impl Into<String>, journal: Journal) -> Self {
        Self {
            label: label.into(),
            journal,
        }
    }
}

impl Middleware for JournalingMiddleware {
    fn wrap(self: Arc<Self>, next: HandlerFn) -> HandlerFn {
        Arc::new(move |ctx| {
            let this = Arc::clone(&self);
            let next = Arc::clone(&next);
            Box::pin(async move {
                this.journal.record(format!("{}-before", this.label));
                let outcome = (next)(ctx).await;
                this.journal.record(format!("{}-after", this.label));
                outcome
            })
        })
    }
}

/// In-memory [`AuthorityStore`].
#[derive(Clone, Default)]
pub struct StaticAuthority {
    sets: Arc<Mutex<HashMap<i64, PermissionSet>>>,
}

impl StaticAuthority {
    /// Create an empty store: every entity loads as the default set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `rank` to `entity` in `scope`.
    pub fn grant(&self, entity: i64, scope: i64, rank: Permission) {
        self.sets
            .lock()
            .unwrap()
            .entry(entity)
            .or_default()
            .set(scope, rank);
    }
}

impl AuthorityStore for StaticAuthority {
    async fn load(&self, entity: i64) -> PermissionSet {
        self.sets
            .lock()
            .unwrap()
            .get(&entity)
            .cloned()
            .unwrap_or_default()
    }

    async fn save(&self, entity: i64, set: &PermissionSet) -> Result<(), BoxError> {
        self.sets.lock().unwrap().insert(entity, set.clone());
        Ok(())
    }
}

/// In-memory [`FeatureGate`]: enabled unless explicitly disabled, matching
/// the documented default for unknown scopes.
#[derive(Clone, Default)]
pub struct StaticGate {
    disabled: Arc<Mutex<HashSet<(String, i64)>>>,
}

impl StaticGate {
    /// Create a gate with everything enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable `feature` for `scope`.
    pub fn disable(&self, feature: impl Into<String>, scope: i64) {
        self.disabled.lock().unwrap().insert((feature.into(), scope));
    }
}

impl FeatureGate for StaticGate {
    async fn enabled(&self, feature: &str, scope: i64) -> bool {
        !self
            .disabled
            .lock()
            .unwrap()
            .contains(&(feature.to_string(), scope))
    }
}
