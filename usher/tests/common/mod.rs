#![allow(dead_code)]

use std::time::Duration;
use usher::testing::{Journal, StaticGate};
use usher::{Context, DispatchError, Event, FeatureGate, Handler};

pub fn ctx(text: &str) -> Context {
    ctx_from(1, 100, text)
}

pub fn ctx_from(sender: i64, scope: i64, text: &str) -> Context {
    Context::new(Event::new(sender, scope, text))
}

/// Matches everything and panics in `handle`.
pub struct PanickingHandler;

impl Handler for PanickingHandler {
    async fn matches(&self, _ctx: &Context) -> bool {
        true
    }

    async fn handle(&self, _ctx: &mut Context) -> Result<(), DispatchError> {
        panic!("boom");
    }
}

/// Matches everything and sleeps before succeeding.
pub struct SleepyHandler {
    pub duration: Duration,
}

impl Handler for SleepyHandler {
    async fn matches(&self, _ctx: &Context) -> bool {
        true
    }

    async fn handle(&self, _ctx: &mut Context) -> Result<(), DispatchError> {
        tokio::time::sleep(self.duration).await;
        Ok(())
    }
}

/// A handler whose `matches` consults a feature gate for the event's scope,
/// the way real feature handlers do.
pub struct GatedHandler {
    pub feature: &'static str,
    pub gate: StaticGate,
    pub journal: Journal,
}

impl Handler for GatedHandler {
    async fn matches(&self, ctx: &Context) -> bool {
        self.gate.enabled(self.feature, ctx.scope()).await
    }

    async fn handle(&self, _ctx: &mut Context) -> Result<(), DispatchError> {
        self.journal.record(self.feature);
        Ok(())
    }
}
