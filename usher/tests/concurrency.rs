//! Concurrent registration and dispatch.
//!
//! Dispatches take a snapshot of the registry, so registrations racing with
//! in-flight routes must never panic or expose a partially sorted registry.

mod common;

use common::ctx_from;
use std::sync::Arc;
use usher::testing::{Journal, ScriptedHandler};
use usher::{Router, priority};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn registration_races_dispatch_safely() {
    let journal = Journal::new();
    let router = Arc::new(Router::new());

    let registrar = {
        let router = Arc::clone(&router);
        let journal = journal.clone();
        tokio::spawn(async move {
            for i in 0..50 {
                router.register(
                    ScriptedHandler::new(format!("h{i}"), journal.clone())
                        .at_priority((i * 7) % 13)
                        .continuing(),
                );
                tokio::task::yield_now().await;
            }
        })
    };

    let mut dispatchers = Vec::new();
    for task in 0..4 {
        let router = Arc::clone(&router);
        dispatchers.push(tokio::spawn(async move {
            for event in 0..50 {
                let mut ctx = ctx_from(task, 100, "hello");
                router.route(&mut ctx).await.unwrap();
                let _ = event;
                tokio::task::yield_now().await;
            }
        }));
    }

    registrar.await.unwrap();
    for dispatcher in dispatchers {
        dispatcher.await.unwrap();
    }

    // The registry must be fully sorted once the dust settles.
    let priorities = router.priorities();
    let mut sorted = priorities.clone();
    sorted.sort();
    assert_eq!(priorities, sorted);
    assert_eq!(router.handler_count(), 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_dispatches_do_not_interfere() {
    let journal = Journal::new();
    let router = Arc::new(Router::new());
    router.register(
        ScriptedHandler::new("observer", journal.clone())
            .at_priority(priority::OBSERVER)
            .continuing(),
    );

    let mut joins = Vec::new();
    for sender in 0..8 {
        let router = Arc::clone(&router);
        joins.push(tokio::spawn(async move {
            for _ in 0..25 {
                let mut ctx = ctx_from(sender, 100, "hello");
                router.route(&mut ctx).await.unwrap();
            }
        }));
    }
    for join in joins {
        join.await.unwrap();
    }

    assert_eq!(journal.len(), 8 * 25);
}
