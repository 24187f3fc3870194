//! Router dispatch semantics: priority order, tie-breaks, continue flags.

mod common;

use common::ctx;
use usher::testing::{Journal, ScriptedHandler};
use usher::{Context, DispatchError, Handler, Router, priority};

#[tokio::test]
async fn handlers_run_in_ascending_priority_order() {
    let journal = Journal::new();
    let router = Router::new();

    // Registered out of order on purpose.
    router.register(
        ScriptedHandler::new("observer", journal.clone())
            .at_priority(priority::OBSERVER)
            .continuing(),
    );
    router.register(
        ScriptedHandler::new("system", journal.clone())
            .at_priority(priority::SYSTEM)
            .continuing(),
    );
    router.register(
        ScriptedHandler::new("command", journal.clone())
            .at_priority(priority::COMMAND)
            .continuing(),
    );

    router.route(&mut ctx("hello")).await.unwrap();
    assert_eq!(journal.entries(), vec!["system", "command", "observer"]);
}

#[tokio::test]
async fn registry_is_sorted_after_every_registration() {
    let journal = Journal::new();
    let router = Router::new();
    for p in [500, 0, 1000, 100, 0, 500] {
        router.register(ScriptedHandler::new("h", journal.clone()).at_priority(p));
        let priorities = router.priorities();
        let mut sorted = priorities.clone();
        sorted.sort();
        assert_eq!(priorities, sorted);
    }
    assert_eq!(router.handler_count(), 6);
}

#[tokio::test]
async fn equal_priorities_keep_registration_order() {
    let journal = Journal::new();
    let router = Router::new();
    for name in ["first", "second", "third"] {
        router.register(
            ScriptedHandler::new(name, journal.clone())
                .at_priority(priority::COMMAND)
                .continuing(),
        );
    }

    router.route(&mut ctx("hello")).await.unwrap();
    assert_eq!(journal.entries(), vec!["first", "second", "third"]);
}

#[tokio::test]
async fn non_continuing_handler_stops_the_scan() {
    let journal = Journal::new();
    let router = Router::new();
    router.register(ScriptedHandler::new("stopper", journal.clone()).at_priority(10));
    router.register(
        ScriptedHandler::new("later", journal.clone())
            .at_priority(20)
            .continuing(),
    );

    router.route(&mut ctx("hello")).await.unwrap();
    assert_eq!(journal.entries(), vec!["stopper"]);
}

#[tokio::test]
async fn non_continuing_outcome_is_authoritative_even_on_error() {
    let journal = Journal::new();
    let router = Router::new();
    router.register(
        ScriptedHandler::new("stopper", journal.clone())
            .at_priority(10)
            .failing("nope"),
    );
    router.register(
        ScriptedHandler::new("later", journal.clone())
            .at_priority(20)
            .continuing(),
    );

    let err = router.route(&mut ctx("hello")).await.unwrap_err();
    assert!(matches!(err, DispatchError::Handler(_)));
    assert_eq!(journal.entries(), vec!["stopper"]);
}

#[tokio::test]
async fn continuing_handlers_run_past_errors() {
    let journal = Journal::new();
    let router = Router::new();
    router.register(
        ScriptedHandler::new("a", journal.clone())
            .at_priority(1)
            .continuing(),
    );
    router.register(
        ScriptedHandler::new("b", journal.clone())
            .at_priority(2)
            .continuing()
            .failing("b broke"),
    );
    router.register(
        ScriptedHandler::new("c", journal.clone())
            .at_priority(3)
            .continuing(),
    );

    // The failure in the middle must not block the rest of the scan, but the
    // last error seen is still reported.
    let err = router.route(&mut ctx("hello")).await.unwrap_err();
    assert!(matches!(err, DispatchError::Handler(_)));
    assert_eq!(journal.entries(), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn all_continuing_and_successful_returns_ok() {
    let journal = Journal::new();
    let router = Router::new();
    for name in ["a", "b"] {
        router.register(ScriptedHandler::new(name, journal.clone()).continuing());
    }
    router.route(&mut ctx("hello")).await.unwrap();
    assert_eq!(journal.len(), 2);
}

#[tokio::test]
async fn no_match_is_not_a_failure() {
    let journal = Journal::new();
    let router = Router::new();
    router.register(ScriptedHandler::new("cmd", journal.clone()).prefix("/"));

    router.route(&mut ctx("plain chatter")).await.unwrap();
    assert!(journal.is_empty());
}

#[tokio::test]
async fn non_matching_handlers_are_skipped() {
    let journal = Journal::new();
    let router = Router::new();
    router.register(
        ScriptedHandler::new("mute", journal.clone())
            .prefix("/mute")
            .continuing(),
    );
    router.register(
        ScriptedHandler::new("warn", journal.clone())
            .prefix("/warn")
            .continuing(),
    );

    router.route(&mut ctx("/warn spammer")).await.unwrap();
    assert_eq!(journal.entries(), vec!["warn"]);
}

/// Reads the marker an earlier handler left in the context store.
struct DownstreamHandler {
    journal: Journal,
}

impl Handler for DownstreamHandler {
    async fn matches(&self, _ctx: &Context) -> bool {
        true
    }

    async fn handle(&self, ctx: &mut Context) -> Result<(), DispatchError> {
        if ctx.get::<bool>("ran:upstream") == Some(&true) {
            self.journal.record("saw-upstream");
        }
        Ok(())
    }

    fn priority(&self) -> i32 {
        priority::OBSERVER
    }

    fn continue_chain(&self) -> bool {
        true
    }
}

#[tokio::test]
async fn context_store_passes_data_between_handlers() {
    let journal = Journal::new();
    let router = Router::new();
    router.register(
        ScriptedHandler::new("upstream", journal.clone())
            .at_priority(priority::COMMAND)
            .continuing(),
    );
    router.register(DownstreamHandler {
        journal: journal.clone(),
    });

    router.route(&mut ctx("hello")).await.unwrap();
    assert_eq!(journal.entries(), vec!["upstream", "saw-upstream"]);
}

#[tokio::test]
async fn registrations_apply_to_later_dispatches() {
    let journal = Journal::new();
    let router = Router::new();
    router.route(&mut ctx("hello")).await.unwrap();
    assert!(journal.is_empty());

    router.register(ScriptedHandler::new("late", journal.clone()));
    router.route(&mut ctx("hello")).await.unwrap();
    assert_eq!(journal.entries(), vec!["late"]);
}
